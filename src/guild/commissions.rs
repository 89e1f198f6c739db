//! Commission catalog.
//!
//! A commission is the Guild Master's assignment: the one dungeon type a
//! hunter is expected to run next. The recommendation engine picks
//! exactly one of these per evaluation.

use serde::Serialize;

/// Stable commission identifiers, serialized snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionId {
    Fundamentals,
    SystemDesign,
    Transactions,
    Algorithms,
    ApiDesign,
    Debugging,
    Warmup,
    BossRetry,
}

/// One entry in the Guild Master's commission book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Commission {
    pub id: CommissionId,
    /// Dungeon type that satisfies the commission. The access gate
    /// compares requested types against this string.
    pub dungeon_type: &'static str,
    pub description: &'static str,
    /// Urgency, 1 highest. Informational; rule order decides.
    pub priority: u8,
}

pub static FUNDAMENTALS: Commission = Commission {
    id: CommissionId::Fundamentals,
    dungeon_type: "Fundamentals Dungeon",
    description: "Reinforce core concepts",
    priority: 1,
};

pub static SYSTEM_DESIGN: Commission = Commission {
    id: CommissionId::SystemDesign,
    dungeon_type: "System Design Dungeon",
    description: "Improve architecture and scalability thinking",
    priority: 2,
};

pub static TRANSACTIONS: Commission = Commission {
    id: CommissionId::Transactions,
    dungeon_type: "Transactions & Consistency Dungeon",
    description: "Fix database and consistency weaknesses",
    priority: 2,
};

pub static ALGORITHMS: Commission = Commission {
    id: CommissionId::Algorithms,
    dungeon_type: "Algorithm Challenge Dungeon",
    description: "Strengthen problem-solving and algorithmic thinking",
    priority: 2,
};

pub static API_DESIGN: Commission = Commission {
    id: CommissionId::ApiDesign,
    dungeon_type: "API Design Dungeon",
    description: "Master RESTful design and API best practices",
    priority: 2,
};

pub static DEBUGGING: Commission = Commission {
    id: CommissionId::Debugging,
    dungeon_type: "Bug Hunt Dungeon",
    description: "Sharpen debugging and troubleshooting skills",
    priority: 2,
};

pub static WARMUP: Commission = Commission {
    id: CommissionId::Warmup,
    dungeon_type: "Warmup Dungeon",
    description: "Quick practice before boss fight",
    priority: 3,
};

pub static BOSS_RETRY: Commission = Commission {
    id: CommissionId::BossRetry,
    dungeon_type: "Rank Boss Dungeon",
    description: "Challenge the rank boss for promotion",
    priority: 4,
};

/// Every commission, highest urgency first.
pub static ALL_COMMISSIONS: [&Commission; 8] = [
    &FUNDAMENTALS,
    &SYSTEM_DESIGN,
    &TRANSACTIONS,
    &ALGORITHMS,
    &API_DESIGN,
    &DEBUGGING,
    &WARMUP,
    &BOSS_RETRY,
];
