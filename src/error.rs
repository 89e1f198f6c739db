//! Error taxonomy for the guild service boundary.
//!
//! Gate denials (boss eligibility, dungeon access) are verdict values,
//! not errors; the only place a denial becomes a [`GuildError`] is the
//! start transition, which aborts with the gate's reason. Malformed
//! oracle output is recovered locally and never surfaces here.

use crate::store::StoreError;
use thiserror::Error;

/// Broad error class a routing collaborator can map to a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed request fields. Terminal, no retry.
    Validation,
    /// Unknown player or attempt. Terminal.
    NotFound,
    /// Rank gate or cooldown denial carried as a structured reason.
    Forbidden,
    /// Attempt already submitted; scoring is single-shot.
    Conflict,
    /// Unexpected persistence or logic fault.
    Internal,
}

/// Errors returned by [`crate::service::GuildService`] operations.
#[derive(Debug, Error)]
pub enum GuildError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("unknown rank: {0}")]
    UnknownRank(String),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("dungeon attempt not found: {0}")]
    AttemptNotFound(String),

    #[error("{reason}")]
    Forbidden { reason: String },

    #[error("dungeon attempt already submitted")]
    AlreadySubmitted,

    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl GuildError {
    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuildError::Validation(_) | GuildError::UnknownRank(_) => ErrorKind::Validation,
            GuildError::PlayerNotFound(_) | GuildError::AttemptNotFound(_) => ErrorKind::NotFound,
            GuildError::Forbidden { .. } => ErrorKind::Forbidden,
            GuildError::AlreadySubmitted => ErrorKind::Conflict,
            GuildError::Store(StoreError::AlreadyScored(_)) => ErrorKind::Conflict,
            GuildError::Store(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_map_to_taxonomy() {
        assert_eq!(
            GuildError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            GuildError::UnknownRank("Z".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            GuildError::PlayerNotFound("p".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(GuildError::AlreadySubmitted.kind(), ErrorKind::Conflict);
        assert_eq!(
            GuildError::Forbidden {
                reason: "locked".into()
            }
            .kind(),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_forbidden_message_is_the_reason() {
        let err = GuildError::Forbidden {
            reason: "Boss cooldown active".into(),
        };
        assert_eq!(err.to_string(), "Boss cooldown active");
    }
}
