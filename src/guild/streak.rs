//! Win streak tracking and the score bonus it earns.

use serde::Serialize;

use crate::attempt::DungeonAttempt;
use crate::constants::{NORMALIZED_SCORE_MAX, STREAK_TIERS};

/// Consecutive passes counted from the most recent attempt backwards.
///
/// The slice is expected to be pre-filtered to progression attempts at
/// the rank under evaluation, in insertion order. Timestamps are whole
/// seconds, so insertion order breaks same-second ties.
pub fn current_streak(attempts: &[&DungeonAttempt]) -> u32 {
    let mut recent: Vec<&DungeonAttempt> = attempts.to_vec();
    recent.reverse();
    recent.sort_by_key(|a| std::cmp::Reverse(a.created_at));
    recent.iter().take_while(|a| a.passed).count() as u32
}

/// Bonus percent for a streak: the highest tier threshold at or below it.
pub fn streak_bonus_percent(streak: u32) -> u32 {
    STREAK_TIERS
        .iter()
        .rev()
        .find(|(threshold, _, _)| streak >= *threshold)
        .map(|(_, bonus, _)| *bonus)
        .unwrap_or(0)
}

/// Flavor label for the streak tier, if any tier is reached.
pub fn streak_label(streak: u32) -> Option<&'static str> {
    STREAK_TIERS
        .iter()
        .rev()
        .find(|(threshold, _, _)| streak >= *threshold)
        .map(|(_, _, label)| *label)
}

/// A normalized score after the streak bonus was applied.
#[derive(Debug, Clone, Serialize)]
pub struct BoostedScore {
    pub original: f64,
    pub bonus_percent: u32,
    pub final_score: f64,
    pub label: Option<&'static str>,
}

/// Applies the streak bonus multiplicatively, capped at the top of the
/// normalized scale.
pub fn apply_streak_bonus(score: f64, streak: u32) -> BoostedScore {
    let bonus_percent = streak_bonus_percent(streak);
    let boosted = score + score * bonus_percent as f64 / 100.0;
    BoostedScore {
        original: score,
        bonus_percent,
        final_score: boosted.min(NORMALIZED_SCORE_MAX),
        label: streak_label(streak),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempt::{AttemptMode, DungeonAttempt};
    use crate::rank::Rank;

    fn attempt(passed: bool, created_at: i64) -> DungeonAttempt {
        let mut a = DungeonAttempt::begin(
            "p1",
            Rank::E,
            "backend",
            false,
            AttemptMode::Progression,
            vec!["q".into()],
            created_at,
        );
        a.passed = passed;
        a
    }

    #[test]
    fn test_streak_counts_from_most_recent() {
        let history = [
            attempt(true, 10),
            attempt(false, 20),
            attempt(true, 30),
            attempt(true, 40),
        ];
        let refs: Vec<&DungeonAttempt> = history.iter().collect();
        assert_eq!(current_streak(&refs), 2);
    }

    #[test]
    fn test_streak_zero_when_latest_failed() {
        let history = [attempt(true, 10), attempt(false, 20)];
        let refs: Vec<&DungeonAttempt> = history.iter().collect();
        assert_eq!(current_streak(&refs), 0);
    }

    #[test]
    fn test_streak_ignores_input_order() {
        let history = [attempt(true, 40), attempt(true, 10), attempt(true, 30)];
        let refs: Vec<&DungeonAttempt> = history.iter().collect();
        assert_eq!(current_streak(&refs), 3);
    }

    #[test]
    fn test_bonus_tiers() {
        assert_eq!(streak_bonus_percent(0), 0);
        assert_eq!(streak_bonus_percent(2), 0);
        assert_eq!(streak_bonus_percent(3), 5);
        assert_eq!(streak_bonus_percent(4), 5);
        assert_eq!(streak_bonus_percent(5), 10);
        assert_eq!(streak_bonus_percent(7), 15);
        assert_eq!(streak_bonus_percent(10), 20);
        assert_eq!(streak_bonus_percent(42), 20);
    }

    #[test]
    fn test_labels_match_tiers() {
        assert_eq!(streak_label(2), None);
        assert_eq!(streak_label(3), Some("🔥 Hot Streak!"));
        assert_eq!(streak_label(10), Some("💀 Legendary!"));
    }

    #[test]
    fn test_apply_bonus_caps_at_hundred() {
        let boosted = apply_streak_bonus(60.0, 5);
        assert!((boosted.final_score - 66.0).abs() < 1e-9);
        assert_eq!(boosted.bonus_percent, 10);

        let capped = apply_streak_bonus(95.0, 10);
        assert_eq!(capped.final_score, 100.0);
    }

    #[test]
    fn test_no_streak_leaves_score_unchanged() {
        let boosted = apply_streak_bonus(55.0, 1);
        assert_eq!(boosted.final_score, 55.0);
        assert!(boosted.label.is_none());
    }
}
