//! Checksummed snapshot file store.
//!
//! Same semantics as the in-memory store with a write-through snapshot
//! after every mutation.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Bincode-serialized snapshot (variable length)
//! - SHA256 checksum over the three fields above (32 bytes)

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::attempt::DungeonAttempt;
use crate::constants::STORE_VERSION_MAGIC;
use crate::player::Player;
use crate::rank::Rank;
use crate::store::{GuildStore, ScoredOutcome, StoreError, StoreResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    players: Vec<Player>,
    attempts: Vec<DungeonAttempt>,
}

/// Durable store backed by one snapshot file.
pub struct FileStore {
    path: PathBuf,
    snapshot: Mutex<Snapshot>,
}

impl FileStore {
    /// Opens the store at the platform config location, loading any
    /// existing snapshot.
    pub fn open() -> StoreResult<Self> {
        let project_dirs = ProjectDirs::from("", "", "guildhall").ok_or_else(|| {
            StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Self::at_path(config_dir.join("guild.dat"))
    }

    /// Opens the store at an explicit path.
    pub fn at_path(path: PathBuf) -> StoreResult<Self> {
        let snapshot = if path.exists() {
            load_snapshot(&path)?
        } else {
            Snapshot::default()
        };
        Ok(FileStore {
            path,
            snapshot: Mutex::new(snapshot),
        })
    }

    #[cfg(test)]
    fn new_for_test() -> StoreResult<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "guildhall-test-{}-{test_id}",
            std::process::id()
        ));
        fs::create_dir_all(&temp_dir)?;
        let path = temp_dir.join("guild.dat");
        // A fresh store must not load leftovers from a previous test run.
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Self::at_path(path)
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        match self.snapshot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let data = bincode::serialize(snapshot)
            .map_err(|e| StoreError::Corrupt(format!("snapshot serialization failed: {e}")))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(STORE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.path)?;
        file.write_all(&STORE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        Ok(())
    }
}

fn load_snapshot(path: &Path) -> StoreResult<Snapshot> {
    let mut file = fs::File::open(path)?;

    let mut version_bytes = [0u8; 8];
    file.read_exact(&mut version_bytes)?;
    let version = u64::from_le_bytes(version_bytes);
    if version != STORE_VERSION_MAGIC {
        return Err(StoreError::Corrupt(format!(
            "unexpected file magic: expected 0x{STORE_VERSION_MAGIC:016X}, got 0x{version:016X}"
        )));
    }

    let mut length_bytes = [0u8; 4];
    file.read_exact(&mut length_bytes)?;
    let data_len = u32::from_le_bytes(length_bytes);

    let mut data = vec![0u8; data_len as usize];
    file.read_exact(&mut data)?;

    let mut stored_checksum = [0u8; 32];
    file.read_exact(&mut stored_checksum)?;

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(&data);
    let computed = hasher.finalize();
    if stored_checksum != computed.as_slice() {
        return Err(StoreError::Corrupt(
            "checksum verification failed".to_string(),
        ));
    }

    bincode::deserialize(&data)
        .map_err(|e| StoreError::Corrupt(format!("snapshot deserialization failed: {e}")))
}

impl GuildStore for FileStore {
    fn insert_player(&self, player: &Player) -> StoreResult<()> {
        let mut snapshot = self.lock();
        snapshot.players.push(player.clone());
        self.persist(&snapshot)
    }

    fn player(&self, id: &str) -> StoreResult<Option<Player>> {
        Ok(self.lock().players.iter().find(|p| p.id == id).cloned())
    }

    fn players(&self) -> StoreResult<Vec<Player>> {
        Ok(self.lock().players.clone())
    }

    fn set_player_rank(&self, id: &str, rank: Rank) -> StoreResult<()> {
        let mut snapshot = self.lock();
        let player = snapshot
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PlayerNotFound(id.to_string()))?;
        player.rank = rank;
        self.persist(&snapshot)
    }

    fn insert_attempt(&self, attempt: &DungeonAttempt) -> StoreResult<()> {
        let mut snapshot = self.lock();
        snapshot.attempts.push(attempt.clone());
        self.persist(&snapshot)
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
        let mut snapshot = self.lock();
        let attempt = snapshot
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
        let scored = attempt.clone();
        self.persist(&snapshot)?;
        Ok(scored)
    }
}
