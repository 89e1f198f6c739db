//! Player identity and presentation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rank::Rank;

/// A registered hunter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Self-declared engineering role, e.g. "backend". Optional.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rank: Rank,
    /// Self-reported weak areas. Display only; the analyzer derives the
    /// authoritative tally from attempt records.
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// Unix timestamp of registration.
    pub created_at: i64,
}

impl Player {
    /// Registers a new player at the bottom of the ladder.
    pub fn register(role: Option<&str>, now: i64) -> Self {
        Player {
            id: Uuid::new_v4().to_string(),
            role: role.map(|r| r.trim().to_lowercase()).filter(|r| !r.is_empty()),
            rank: Rank::E,
            weaknesses: Vec::new(),
            created_at: now,
        }
    }

    /// Role string used when building oracle prompts.
    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or("Backend Engineer")
    }

    /// Public handle shown on leaderboards: "Hunter " plus the last six
    /// characters of the id, uppercased.
    pub fn display_name(&self) -> String {
        let tail: String = self
            .id
            .chars()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("Hunter {}", tail.to_uppercase())
    }

    /// Flavor title derived from the declared role.
    pub fn class_title(&self) -> &'static str {
        match self.role.as_deref() {
            Some("frontend") => "Interface Architect",
            Some("backend") => "System Overlord",
            Some("fullstack") => "Grand Weaver",
            Some("mobile") => "Pathfinder",
            Some("devops") => "Infrastructure Titan",
            Some("data") => "Knowledge Keeper",
            Some("ml") => "Artificial Mind",
            Some("security") => "Gate Guardian",
            Some("null") => "Wandering Soul",
            _ => "Novice Adventurer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_starts_at_rank_e() {
        let p = Player::register(Some("Backend"), 1_700_000_000);
        assert_eq!(p.rank, Rank::E);
        assert_eq!(p.role.as_deref(), Some("backend"));
        assert_eq!(p.created_at, 1_700_000_000);
    }

    #[test]
    fn test_register_blank_role_is_none() {
        let p = Player::register(Some("   "), 0);
        assert!(p.role.is_none());
        assert_eq!(p.role_label(), "Backend Engineer");
    }

    #[test]
    fn test_display_name_uses_id_tail() {
        let mut p = Player::register(None, 0);
        p.id = "abc123-deadbeef".to_string();
        assert_eq!(p.display_name(), "Hunter ADBEEF");
    }

    #[test]
    fn test_class_titles() {
        let mut p = Player::register(Some("ml"), 0);
        assert_eq!(p.class_title(), "Artificial Mind");
        p.role = None;
        assert_eq!(p.class_title(), "Novice Adventurer");
        p.role = Some("astronaut".to_string());
        assert_eq!(p.class_title(), "Novice Adventurer");
    }
}
