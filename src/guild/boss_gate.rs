//! Boss eligibility gate.
//!
//! A denial here is a verdict, not an error. The start transition is
//! the one caller that converts it into a refusal.

use serde::Serialize;

use crate::constants::{BOSS_COOLDOWN_MINUTES, BOSS_GATE_MIN_AVG};
use crate::guild::analyzer::Analysis;
use crate::guild::commissions::CommissionId;
use crate::guild::recommendation::Recommendation;

/// Outcome of the boss eligibility check.
#[derive(Debug, Clone, Serialize)]
pub struct BossVerdict {
    pub allowed: bool,
    pub reason: String,
    /// Whole minutes left on the cooldown, rounded up. Set on a
    /// cooldown denial only.
    pub cooldown_remaining_minutes: Option<i64>,
    /// Unix timestamp when the cooldown lapses.
    pub cooldown_ends_at: Option<i64>,
    pub current_streak: u32,
    pub streak_bonus: u32,
}

impl BossVerdict {
    fn denied(reason: String, analysis: &Analysis) -> Self {
        BossVerdict {
            allowed: false,
            reason,
            cooldown_remaining_minutes: None,
            cooldown_ends_at: None,
            current_streak: analysis.current_streak,
            streak_bonus: analysis.streak_bonus,
        }
    }
}

/// Decides whether the rank boss may be challenged right now.
pub fn evaluate_boss_gate(
    analysis: &Analysis,
    recommendation: &Recommendation,
    now: i64,
) -> BossVerdict {
    if recommendation.commission.id != CommissionId::BossRetry {
        return BossVerdict::denied(
            "Training incomplete - complete required dungeons first".to_string(),
            analysis,
        );
    }

    if let Some(failed_at) = analysis.last_boss_failure {
        let cooldown_secs = BOSS_COOLDOWN_MINUTES * 60;
        let elapsed = now - failed_at;
        if elapsed < cooldown_secs {
            let remaining_secs = cooldown_secs - elapsed;
            let remaining_minutes = (remaining_secs + 59) / 60;
            let mut verdict = BossVerdict::denied(
                format!("Boss cooldown active. Try again in {remaining_minutes} minute(s)."),
                analysis,
            );
            verdict.cooldown_remaining_minutes = Some(remaining_minutes);
            verdict.cooldown_ends_at = Some(failed_at + cooldown_secs);
            return verdict;
        }
    }

    if analysis.avg_score < BOSS_GATE_MIN_AVG {
        return BossVerdict::denied(
            "Average score too low for boss attempt (need 6+)".to_string(),
            analysis,
        );
    }

    BossVerdict {
        allowed: true,
        reason: "Boss fight authorized! Good luck, Hunter! 🎯".to_string(),
        cooldown_remaining_minutes: None,
        cooldown_ends_at: None,
        current_streak: analysis.current_streak,
        streak_bonus: analysis.streak_bonus,
    }
}
