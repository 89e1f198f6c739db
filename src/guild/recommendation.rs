//! The Guild Master's commission recommendation.
//!
//! A fixed decision table: rules are evaluated top to bottom and the
//! first match wins. The order is a gameplay contract; reordering it
//! changes game balance, so treat it like a wire format.

use serde::Serialize;

use crate::constants::{
    LOW_AVG_THRESHOLD, SEVERE_WEAKNESS_COUNT, STREAK_BOSS_PROMPT, WARMUP_MAX_STREAK,
};
use crate::guild::analyzer::Analysis;
use crate::guild::commissions::{
    Commission, ALGORITHMS, API_DESIGN, BOSS_RETRY, DEBUGGING, FUNDAMENTALS, SYSTEM_DESIGN,
    TRANSACTIONS, WARMUP,
};
use crate::guild::streak::streak_label;
use crate::rank::{rank_config, Rank};

/// Keyword to targeted commission, matched against weakness tags in
/// this order. Configuration data in the same spirit as the weakness
/// lexicon.
static WEAKNESS_COMMISSIONS: [(&str, &Commission); 9] = [
    ("system design", &SYSTEM_DESIGN),
    ("transaction", &TRANSACTIONS),
    ("consistency", &TRANSACTIONS),
    ("algorithm", &ALGORITHMS),
    ("data structure", &ALGORITHMS),
    ("api", &API_DESIGN),
    ("rest", &API_DESIGN),
    ("debug", &DEBUGGING),
    ("error handling", &DEBUGGING),
];

/// The weakness a targeted commission is meant to fix.
#[derive(Debug, Clone, Serialize)]
pub struct TargetedWeakness {
    pub tag: String,
    pub count: u32,
}

/// Exactly one commission plus the reasoning behind it.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub commission: &'static Commission,
    pub reason: String,
    pub targeted_weakness: Option<TargetedWeakness>,
    pub current_streak: u32,
    pub streak_bonus: u32,
    /// Optional second choice, only set by the warmup rule.
    pub alternative: Option<&'static Commission>,
}

/// Picks the single commission for a player's current state.
pub fn recommend(analysis: &Analysis, rank: Rank) -> Recommendation {
    let base = |commission: &'static Commission, reason: String| Recommendation {
        commission,
        reason,
        targeted_weakness: None,
        current_streak: analysis.current_streak,
        streak_bonus: analysis.streak_bonus,
        alternative: None,
    };

    // 1. A failed rank boss outranks everything else.
    if analysis.failed_boss {
        return base(&BOSS_RETRY, "Rank boss not cleared".to_string());
    }

    // 2. A weakness seen twice or more, if a commission targets it.
    if let Some((commission, tag, count)) = targeted_commission(analysis) {
        let mut rec = base(commission, format!("Repeated weakness detected: {tag}"));
        rec.targeted_weakness = Some(TargetedWeakness { tag, count });
        return rec;
    }

    // 3. Low average. Only meaningful once there is a history; a fresh
    //    player's zero average must fall through to rule 4.
    if analysis.attempt_count > 0 && analysis.avg_score < LOW_AVG_THRESHOLD {
        return base(&FUNDAMENTALS, "Average score below threshold".to_string());
    }

    // 4. Rank requirement on cleared fundamentals.
    let required = rank_config(rank).fundamentals_required;
    if analysis.cleared_fundamentals < required {
        return base(
            &FUNDAMENTALS,
            format!(
                "Fundamentals incomplete: {}/{} cleared",
                analysis.cleared_fundamentals, required
            ),
        );
    }

    // 5. A hot streak is the moment to push for the boss.
    if analysis.current_streak >= STREAK_BOSS_PROMPT {
        let reason = match streak_label(analysis.current_streak) {
            Some(label) => format!(
                "{label} Streak of {} - challenge the boss",
                analysis.current_streak
            ),
            None => format!("Streak of {} - challenge the boss", analysis.current_streak),
        };
        return base(&BOSS_RETRY, reason);
    }

    // 6. Cold start after clearing fundamentals: suggest a warmup, but
    //    leave the boss door open.
    if analysis.current_streak < WARMUP_MAX_STREAK {
        let mut rec = base(
            &WARMUP,
            "Fundamentals cleared - warm up before the boss".to_string(),
        );
        rec.alternative = Some(&BOSS_RETRY);
        return rec;
    }

    // 7. Nothing holding them back.
    base(&BOSS_RETRY, "Ready for rank advancement".to_string())
}

fn targeted_commission(analysis: &Analysis) -> Option<(&'static Commission, String, u32)> {
    for (keyword, commission) in WEAKNESS_COMMISSIONS.iter() {
        for tag in &analysis.weakness_order {
            let count = analysis.weakness_count.get(tag).copied().unwrap_or(0);
            if count >= SEVERE_WEAKNESS_COUNT && tag.to_lowercase().contains(keyword) {
                return Some((commission, tag.clone(), count));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guild::commissions::CommissionId;

    fn analysis() -> Analysis {
        Analysis::default()
    }

    fn with_weakness(mut a: Analysis, tag: &str, count: u32) -> Analysis {
        a.weakness_count.insert(tag.to_string(), count);
        a.weakness_order.push(tag.to_string());
        a
    }

    #[test]
    fn test_rule1_failed_boss_wins_over_everything() {
        let mut a = with_weakness(analysis(), "System Design", 5);
        a.failed_boss = true;
        a.avg_score = 2.0;
        a.attempt_count = 4;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::BossRetry);
        assert_eq!(rec.reason, "Rank boss not cleared");
    }

    #[test]
    fn test_rule2_targets_repeated_mapped_weakness() {
        let mut a = with_weakness(analysis(), "System Design", 2);
        a.avg_score = 7.0;
        a.attempt_count = 3;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::SystemDesign);
        let target = rec.targeted_weakness.unwrap();
        assert_eq!(target.tag, "System Design");
        assert_eq!(target.count, 2);
    }

    #[test]
    fn test_rule2_keyword_order_decides_between_candidates() {
        // Transactions was seen first, but the system design keyword
        // sits higher in the table.
        let a = with_weakness(
            with_weakness(analysis(), "Transactions", 2),
            "System Design",
            2,
        );
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::SystemDesign);
    }

    #[test]
    fn test_rule2_skips_unmapped_tags() {
        let mut a = with_weakness(analysis(), "Indexing", 3);
        a.avg_score = 7.0;
        a.attempt_count = 2;
        let rec = recommend(&a, Rank::E);
        // Falls through to rule 4.
        assert_eq!(rec.commission.id, CommissionId::Fundamentals);
        assert!(rec.targeted_weakness.is_none());
    }

    #[test]
    fn test_rule2_requires_two_sightings() {
        let mut a = with_weakness(analysis(), "Transactions", 1);
        a.avg_score = 7.0;
        a.attempt_count = 2;
        a.cleared_fundamentals = 2;
        a.current_streak = 2;
        let rec = recommend(&a, Rank::E);
        assert_ne!(rec.commission.id, CommissionId::Transactions);
    }

    #[test]
    fn test_rule3_low_average_needs_a_history() {
        // Fresh player: zero average but zero attempts, so rule 4 speaks.
        let rec = recommend(&analysis(), Rank::E);
        assert_eq!(rec.commission.id, CommissionId::Fundamentals);
        assert_eq!(rec.reason, "Fundamentals incomplete: 0/2 cleared");

        // Same average with a history: now it is rule 3.
        let mut a = analysis();
        a.attempt_count = 3;
        a.avg_score = 3.2;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.reason, "Average score below threshold");
    }

    #[test]
    fn test_rule4_reports_progress_counts() {
        let mut a = analysis();
        a.attempt_count = 1;
        a.avg_score = 8.0;
        a.cleared_fundamentals = 1;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::Fundamentals);
        assert_eq!(rec.reason, "Fundamentals incomplete: 1/2 cleared");
    }

    #[test]
    fn test_rule5_streak_prompts_boss_with_label() {
        let mut a = analysis();
        a.attempt_count = 3;
        a.avg_score = 8.0;
        a.cleared_fundamentals = 2;
        a.current_streak = 3;
        a.streak_bonus = 5;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::BossRetry);
        assert!(rec.reason.contains("Hot Streak"));
        assert_eq!(rec.current_streak, 3);
        assert_eq!(rec.streak_bonus, 5);
    }

    #[test]
    fn test_rule6_warmup_offers_boss_alternative() {
        let mut a = analysis();
        a.attempt_count = 2;
        a.avg_score = 7.0;
        a.cleared_fundamentals = 2;
        a.current_streak = 1;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::Warmup);
        assert_eq!(rec.alternative.map(|c| c.id), Some(CommissionId::BossRetry));
    }

    #[test]
    fn test_rule7_default_at_streak_two() {
        let mut a = analysis();
        a.attempt_count = 2;
        a.avg_score = 7.0;
        a.cleared_fundamentals = 2;
        a.current_streak = 2;
        let rec = recommend(&a, Rank::E);
        assert_eq!(rec.commission.id, CommissionId::BossRetry);
        assert_eq!(rec.reason, "Ready for rank advancement");
    }

    #[test]
    fn test_same_analysis_same_commission() {
        let mut a = with_weakness(analysis(), "cache design", 2);
        a.attempt_count = 5;
        a.avg_score = 6.0;
        let first = recommend(&a, Rank::C);
        let second = recommend(&a, Rank::C);
        assert_eq!(first.commission.id, second.commission.id);
        assert_eq!(first.reason, second.reason);
    }
}
