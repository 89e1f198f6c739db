//! Persistence boundary for players and attempts.
//!
//! The service talks to a [`GuildStore`] trait object it was handed at
//! construction. Two reference implementations ship here: an in-memory
//! store for tests and simulation, and a checksummed snapshot file.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

use crate::attempt::DungeonAttempt;
use crate::player::Player;
use crate::rank::Rank;

/// Scoring payload applied to an attempt exactly once.
#[derive(Debug, Clone)]
pub struct ScoredOutcome {
    pub avg_score: f64,
    pub passed: bool,
    pub weak_areas: Vec<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("attempt not found: {0}")]
    AttemptNotFound(String),

    #[error("attempt already scored: {0}")]
    AlreadyScored(String),

    #[error("store io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store corrupted: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the guild service needs from storage.
///
/// Listing operations return records in insertion order; the analyzer
/// depends on a stable order for its first-seen tie breaks.
pub trait GuildStore {
    fn insert_player(&self, player: &Player) -> StoreResult<()>;
    fn player(&self, id: &str) -> StoreResult<Option<Player>>;
    fn players(&self) -> StoreResult<Vec<Player>>;
    fn set_player_rank(&self, id: &str, rank: Rank) -> StoreResult<()>;

    fn insert_attempt(&self, attempt: &DungeonAttempt) -> StoreResult<()>;
    fn attempt(&self, id: &str) -> StoreResult<Option<DungeonAttempt>>;
    fn attempts_for_player(&self, player_id: &str) -> StoreResult<Vec<DungeonAttempt>>;

    /// The single atomic check-and-score write. Applies `outcome` iff
    /// the attempt exists and is still unscored; a second caller gets
    /// [`StoreError::AlreadyScored`]. Returns the scored attempt.
    fn complete_attempt(&self, id: &str, outcome: &ScoredOutcome)
        -> StoreResult<DungeonAttempt>;
}
