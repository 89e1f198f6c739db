//! The guild rank ladder and per-rank dungeon configuration.
//!
//! Ranks form a totally ordered ladder from E (entry) to SS (legend).
//! Comparison is by ladder position, never by lexical value. All
//! balance numbers live in [`data`] as static metadata; rules do not.

mod data;

pub use data::{rank_config, BossEntry, DungeonEntry, RankConfig};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill rank, lowest to highest. Declaration order drives `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
}

impl Rank {
    /// Every rank in ladder order.
    pub const LADDER: [Rank; 7] = [
        Rank::E,
        Rank::D,
        Rank::C,
        Rank::B,
        Rank::A,
        Rank::S,
        Rank::SS,
    ];

    /// Position in the ladder (E = 0, SS = 6).
    pub fn index(self) -> usize {
        Rank::LADDER.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// The next rank up, or `None` at the top of the ladder.
    pub fn next(self) -> Option<Rank> {
        Rank::LADDER.get(self.index() + 1).copied()
    }

    /// Every rank strictly below this one, lowest first.
    pub fn lower_ranks(self) -> &'static [Rank] {
        &Rank::LADDER[..self.index()]
    }

    /// Parse a rank letter; accepts surrounding whitespace and any case.
    pub fn parse(value: &str) -> Option<Rank> {
        match value.trim().to_ascii_uppercase().as_str() {
            "E" => Some(Rank::E),
            "D" => Some(Rank::D),
            "C" => Some(Rank::C),
            "B" => Some(Rank::B),
            "A" => Some(Rank::A),
            "S" => Some(Rank::S),
            "SS" => Some(Rank::SS),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
            Rank::SS => "SS",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_order_is_by_index_not_lexical() {
        // Lexically "D" < "E", but D outranks E on the ladder.
        assert!(Rank::D > Rank::E);
        assert!(Rank::SS > Rank::S);
        assert!(Rank::A > Rank::B);
        assert_eq!(Rank::E.index(), 0);
        assert_eq!(Rank::SS.index(), 6);
    }

    #[test]
    fn test_next_steps_one_rank_and_stops_at_top() {
        assert_eq!(Rank::E.next(), Some(Rank::D));
        assert_eq!(Rank::S.next(), Some(Rank::SS));
        assert_eq!(Rank::SS.next(), None);
    }

    #[test]
    fn test_parse_accepts_case_and_whitespace() {
        assert_eq!(Rank::parse("e"), Some(Rank::E));
        assert_eq!(Rank::parse(" ss "), Some(Rank::SS));
        assert_eq!(Rank::parse("B"), Some(Rank::B));
        assert_eq!(Rank::parse("F"), None);
        assert_eq!(Rank::parse(""), None);
    }

    #[test]
    fn test_lower_ranks_excludes_self() {
        assert!(Rank::E.lower_ranks().is_empty());
        assert_eq!(Rank::C.lower_ranks(), &[Rank::E, Rank::D]);
        assert_eq!(Rank::SS.lower_ranks().len(), 6);
    }

    #[test]
    fn test_every_rank_has_config() {
        for rank in Rank::LADDER {
            let config = rank_config(rank);
            assert!(config.question_count > 0);
            assert!(!config.normal.is_empty());
            assert!(!config.topics.is_empty());
            assert!(config.pass_score > 0.0);
        }
    }

    #[test]
    fn test_pass_scores_never_decrease_up_the_ladder() {
        let mut previous = 0.0;
        for rank in Rank::LADDER {
            let config = rank_config(rank);
            assert!(config.pass_score >= previous);
            previous = config.pass_score;
        }
    }
}
