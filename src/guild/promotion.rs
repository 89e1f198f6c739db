//! Rank promotion evaluation.

use serde::Serialize;

use crate::attempt::DungeonAttempt;
use crate::constants::PROMOTION_MIN_AVG;
use crate::rank::Rank;

/// Result of weighing a just-scored attempt for promotion.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionVerdict {
    pub promoted: bool,
    pub new_rank: Rank,
    pub reason: &'static str,
}

/// Promotes one step iff a rank boss was defeated with a raw average of
/// at least six. Callers guarantee the attempt is progression mode.
pub fn evaluate_promotion(current_rank: Rank, attempt: &DungeonAttempt) -> PromotionVerdict {
    if !attempt.is_boss || !attempt.passed || attempt.avg_score < PROMOTION_MIN_AVG {
        return PromotionVerdict {
            promoted: false,
            new_rank: current_rank,
            reason: "Boss not cleared with sufficient score (Must be >= 6.0)",
        };
    }

    match current_rank.next() {
        Some(next) => PromotionVerdict {
            promoted: true,
            new_rank: next,
            reason: "Boss defeated",
        },
        None => PromotionVerdict {
            promoted: false,
            new_rank: current_rank,
            reason: "Max rank reached",
        },
    }
}
