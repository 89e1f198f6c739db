//! Dungeon access gate.
//!
//! Progression players cannot pick their own training: the Guild Master
//! assigns exactly one legal dungeon type at a time. Practice runs at
//! lower ranks bypass this gate entirely.

use serde::Serialize;

use crate::guild::recommendation::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessStatus {
    Allowed,
    Locked,
}

/// Verdict of the access check. Never an error.
#[derive(Debug, Clone, Serialize)]
pub struct AccessVerdict {
    pub allowed: bool,
    pub status: AccessStatus,
    pub reason: String,
}

/// Pure equality check against the assigned commission's dungeon type.
pub fn evaluate_dungeon_access(dungeon_type: &str, recommendation: &Recommendation) -> AccessVerdict {
    let required = recommendation.commission.dungeon_type;
    if dungeon_type != required {
        return AccessVerdict {
            allowed: false,
            status: AccessStatus::Locked,
            reason: format!("Guild Master requires completion of {required}"),
        };
    }

    AccessVerdict {
        allowed: true,
        status: AccessStatus::Allowed,
        reason: "Access granted by Guild Master".to_string(),
    }
}
