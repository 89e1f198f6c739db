//! Per-rank dungeon configuration.
//!
//! Single source of truth for what dungeons exist per rank, question
//! counts, pass thresholds, and grader strictness. Pure metadata; the
//! progression rules live in [`crate::guild`].

use super::Rank;

/// A normal (non-boss) dungeon offered at a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Commission dungeon type this entry satisfies.
    pub dungeon_type: &'static str,
}

/// The boss dungeon guarding a rank's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Balance and catalog data for one rank.
#[derive(Debug, Clone, Copy)]
pub struct RankConfig {
    /// Non-boss passes required before the boss unlocks.
    pub fundamentals_required: u32,
    /// Questions issued per dungeon attempt.
    pub question_count: usize,
    /// Grader strictness guidance forwarded to the oracle (0-100).
    pub strictness: u32,
    /// Pass threshold on the normalized 0-100 scale.
    pub pass_score: f64,
    /// Extra normalized points required to clear the rank boss.
    pub boss_bonus: f64,
    /// Topic tags used for prompts and canned fallback questions.
    pub topics: &'static [&'static str],
    /// Normal dungeons offered at this rank.
    pub normal: &'static [DungeonEntry],
    /// The rank boss.
    pub boss: BossEntry,
}

/// Configuration for a rank.
pub fn rank_config(rank: Rank) -> &'static RankConfig {
    match rank {
        Rank::E => &RANK_E,
        Rank::D => &RANK_D,
        Rank::C => &RANK_C,
        Rank::B => &RANK_B,
        Rank::A => &RANK_A,
        Rank::S => &RANK_S,
        Rank::SS => &RANK_SS,
    }
}

static RANK_E: RankConfig = RankConfig {
    fundamentals_required: 2,
    question_count: 3,
    strictness: 50,
    pass_score: 50.0,
    boss_bonus: 10.0,
    topics: &["Basic syntax", "Simple algorithms", "Fundamentals"],
    normal: &[DungeonEntry {
        id: "fundamentals",
        name: "Fundamentals Dungeon",
        description: "Core concepts every engineer must master",
        dungeon_type: "Fundamentals Dungeon",
    }],
    boss: BossEntry {
        id: "rank_boss_e",
        name: "The Gatekeeper",
        description: "Prove you are ready to leave Rank E",
    },
};

static RANK_D: RankConfig = RankConfig {
    fundamentals_required: 2,
    question_count: 3,
    strictness: 55,
    pass_score: 55.0,
    boss_bonus: 10.0,
    topics: &["Data structures", "Basic OOP", "Simple debugging"],
    normal: &[DungeonEntry {
        id: "problem_solving",
        name: "Problem Solving Dungeon",
        description: "Applied logic and debugging challenges",
        dungeon_type: "Fundamentals Dungeon",
    }],
    boss: BossEntry {
        id: "rank_boss_d",
        name: "The Examiner",
        description: "Tests real-world engineering readiness",
    },
};

static RANK_C: RankConfig = RankConfig {
    fundamentals_required: 2,
    question_count: 4,
    strictness: 60,
    pass_score: 60.0,
    boss_bonus: 10.0,
    topics: &["API design", "Database basics", "Error handling"],
    normal: &[
        DungeonEntry {
            id: "api_basics",
            name: "API Design Dungeon",
            description: "RESTful design and endpoint architecture",
            dungeon_type: "API Design Dungeon",
        },
        DungeonEntry {
            id: "database_101",
            name: "Database Dungeon",
            description: "SQL, queries, and data modeling",
            dungeon_type: "Fundamentals Dungeon",
        },
    ],
    boss: BossEntry {
        id: "rank_boss_c",
        name: "The Architect",
        description: "Design systems under pressure",
    },
};

static RANK_B: RankConfig = RankConfig {
    fundamentals_required: 2,
    question_count: 4,
    strictness: 65,
    pass_score: 65.0,
    boss_bonus: 10.0,
    topics: &["System design basics", "Caching", "Authentication"],
    normal: &[
        DungeonEntry {
            id: "system_design_intro",
            name: "System Design Dungeon",
            description: "Scalability and architecture decisions",
            dungeon_type: "System Design Dungeon",
        },
        DungeonEntry {
            id: "auth_security",
            name: "Security Dungeon",
            description: "Authentication, authorization, and security",
            dungeon_type: "Fundamentals Dungeon",
        },
    ],
    boss: BossEntry {
        id: "rank_boss_b",
        name: "The Guardian",
        description: "Defend your architectural decisions",
    },
};

static RANK_A: RankConfig = RankConfig {
    fundamentals_required: 3,
    question_count: 5,
    strictness: 70,
    pass_score: 70.0,
    boss_bonus: 10.0,
    topics: &[
        "Distributed systems",
        "Scalability",
        "Performance tuning",
    ],
    normal: &[
        DungeonEntry {
            id: "distributed_systems",
            name: "Distributed Systems Dungeon",
            description: "CAP theorem, consistency, and partitioning",
            dungeon_type: "System Design Dungeon",
        },
        DungeonEntry {
            id: "performance",
            name: "Performance Dungeon",
            description: "Optimization and profiling challenges",
            dungeon_type: "Fundamentals Dungeon",
        },
    ],
    boss: BossEntry {
        id: "rank_boss_a",
        name: "The Judge",
        description: "Your decisions will be scrutinized",
    },
};

static RANK_S: RankConfig = RankConfig {
    fundamentals_required: 3,
    question_count: 5,
    strictness: 80,
    pass_score: 75.0,
    boss_bonus: 10.0,
    topics: &[
        "Architecture patterns",
        "High availability",
        "Advanced optimization",
    ],
    normal: &[
        DungeonEntry {
            id: "ha_systems",
            name: "High Availability Dungeon",
            description: "Design systems that never go down",
            dungeon_type: "System Design Dungeon",
        },
        DungeonEntry {
            id: "patterns",
            name: "Design Patterns Dungeon",
            description: "Advanced architectural patterns",
            dungeon_type: "System Design Dungeon",
        },
    ],
    boss: BossEntry {
        id: "rank_boss_s",
        name: "The Titan",
        description: "Only the elite survive",
    },
};

static RANK_SS: RankConfig = RankConfig {
    fundamentals_required: 3,
    question_count: 6,
    strictness: 90,
    pass_score: 80.0,
    boss_bonus: 10.0,
    topics: &[
        "Staff-level decisions",
        "Trade-off analysis",
        "System-wide impact",
    ],
    normal: &[
        DungeonEntry {
            id: "staff_level",
            name: "Staff Engineering Dungeon",
            description: "Decisions that shape entire organizations",
            dungeon_type: "System Design Dungeon",
        },
        DungeonEntry {
            id: "trade_offs",
            name: "Trade-off Analysis Dungeon",
            description: "There are no perfect solutions",
            dungeon_type: "System Design Dungeon",
        },
    ],
    boss: BossEntry {
        id: "rank_boss_ss",
        name: "The Sovereign",
        description: "The final challenge. Legendary status awaits.",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_counts_match_rank_table() {
        assert_eq!(rank_config(Rank::E).question_count, 3);
        assert_eq!(rank_config(Rank::C).question_count, 4);
        assert_eq!(rank_config(Rank::A).question_count, 5);
        assert_eq!(rank_config(Rank::SS).question_count, 6);
    }

    #[test]
    fn test_boss_ids_are_unique() {
        let mut seen = Vec::new();
        for rank in Rank::LADDER {
            let id = rank_config(rank).boss.id;
            assert!(!seen.contains(&id), "duplicate boss id {id}");
            seen.push(id);
        }
    }

    #[test]
    fn test_higher_ranks_require_more_fundamentals() {
        assert_eq!(rank_config(Rank::E).fundamentals_required, 2);
        assert_eq!(rank_config(Rank::A).fundamentals_required, 3);
        assert_eq!(rank_config(Rank::SS).fundamentals_required, 3);
    }
}
