//! In-memory store.

use std::sync::{Mutex, MutexGuard};

use crate::attempt::DungeonAttempt;
use crate::player::Player;
use crate::rank::Rank;
use crate::store::{GuildStore, ScoredOutcome, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    players: Vec<Player>,
    attempts: Vec<DungeonAttempt>,
}

/// Mutex-guarded tables in insertion order.
///
/// `complete_attempt` holds the lock across the unscored check and the
/// write, which is what makes the idempotency guard race-free.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl GuildStore for MemoryStore {
    fn insert_player(&self, player: &Player) -> StoreResult<()> {
        self.lock().players.push(player.clone());
        Ok(())
    }

    fn player(&self, id: &str) -> StoreResult<Option<Player>> {
        Ok(self.lock().players.iter().find(|p| p.id == id).cloned())
    }

    fn players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.lock().players.clone())
    }

    fn set_player_rank(&self, id: &str, rank: Rank) -> StoreResult<()> {
        let mut tables = self.lock();
        let player = tables
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlayerNotFound(id.to_string()))?;
        player.rank = rank;
        Ok(())
    }

    fn insert_attempt(&self, attempt: &DungeonAttempt) -> StoreResult<()> {
        self.lock().attempts.push(attempt.clone());
        Ok(())
    }

    fn attempt(&self, id: &str) -> StoreResult<Option<DungeonAttempt>> {
        Ok(self.lock().attempts.iter().find(|a| a.id == id).cloned())
    }

    fn attempts_for_player(&self, player_id: &str) -> StoreResult<Vec<DungeonAttempt>> {
        Ok(self
            .lock()
            .attempts
            .iter()
            .filter(|a| a.player_id == player_id)
            .cloned()
            .collect())
    }

    fn complete_attempt(
        &self,
        id: &str,
        outcome: &ScoredOutcome,
    ) -> StoreResult<DungeonAttempt> {
        let mut tables = self.lock();
        let attempt = tables
            .attempts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::AttemptNotFound(id.to_string()))?;
        if attempt.is_scored() {
            return Err(StoreError::AlreadyScored(id.to_string()));
        }
        attempt.avg_score = outcome.avg_score;
        attempt.passed = outcome.passed;
        attempt.weak_areas = outcome.weak_areas.clone();
        Ok(attempt.clone())
    }
}
