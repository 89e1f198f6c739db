//! Attempt history analysis.
//!
//! Distills a player's full attempt log into the snapshot every other
//! guild rule consumes. Practice attempts are filtered out of all
//! scoring aggregates; the lifetime weakness tally is the one place
//! they still count.

use std::collections::HashMap;

use crate::attempt::{AttemptMode, DungeonAttempt};
use crate::constants::TOP_WEAKNESS_LIMIT;
use crate::guild::streak::{current_streak, streak_bonus_percent};
use crate::rank::Rank;

/// Derived view of a player's history at their current rank.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Mean raw score over progression attempts, all ranks. Unscored
    /// attempts count as zero.
    pub avg_score: f64,
    /// Number of progression attempts considered in `avg_score`.
    pub attempt_count: usize,
    /// A progression boss attempt at the current rank failed.
    pub failed_boss: bool,
    /// Timestamp of the most recent such failure.
    pub last_boss_failure: Option<i64>,
    /// Passed non-boss progression attempts at the current rank.
    pub cleared_fundamentals: u32,
    /// Lifetime weakness tally, practice included.
    pub weakness_count: HashMap<String, u32>,
    /// Tags in first-seen order, for deterministic tie breaks.
    pub weakness_order: Vec<String>,
    /// Top tags by count desc, first-seen on ties, capped at three.
    pub top_weaknesses: Vec<(String, u32)>,
    /// Consecutive progression passes at the current rank.
    pub current_streak: u32,
    /// Bonus percent the streak currently earns.
    pub streak_bonus: u32,
}

/// Analyzes a full attempt history against the player's current rank.
pub fn analyze(current_rank: Rank, attempts: &[DungeonAttempt]) -> Analysis {
    let mut analysis = Analysis::default();

    let progression: Vec<&DungeonAttempt> = attempts
        .iter()
        .filter(|a| a.mode == AttemptMode::Progression)
        .collect();

    analysis.attempt_count = progression.len();
    if !progression.is_empty() {
        let total: f64 = progression.iter().map(|a| a.avg_score).sum();
        analysis.avg_score = total / progression.len() as f64;
    }

    let at_rank: Vec<&DungeonAttempt> = progression
        .iter()
        .copied()
        .filter(|a| a.rank == current_rank)
        .collect();

    for attempt in &at_rank {
        if attempt.is_boss && !attempt.passed {
            analysis.failed_boss = true;
            analysis.last_boss_failure = analysis
                .last_boss_failure
                .map(|t| t.max(attempt.created_at))
                .or(Some(attempt.created_at));
        }
        if !attempt.is_boss && attempt.passed {
            analysis.cleared_fundamentals += 1;
        }
    }

    // Weakness tally spans every attempt, practice included.
    for attempt in attempts {
        for tag in &attempt.weak_areas {
            let count = analysis.weakness_count.entry(tag.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                analysis.weakness_order.push(tag.clone());
            }
        }
    }
    analysis.top_weaknesses = top_weaknesses(&analysis.weakness_count, &analysis.weakness_order);

    analysis.current_streak = current_streak(&at_rank);
    analysis.streak_bonus = streak_bonus_percent(analysis.current_streak);

    analysis
}

fn top_weaknesses(counts: &HashMap<String, u32>, order: &[String]) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = order
        .iter()
        .map(|tag| (tag.clone(), counts.get(tag).copied().unwrap_or(0)))
        .collect();
    // Stable sort keeps first-seen order inside equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_WEAKNESS_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempt::AttemptMode;

    struct Spec {
        rank: Rank,
        is_boss: bool,
        mode: AttemptMode,
        passed: bool,
        avg_score: f64,
        weak_areas: &'static [&'static str],
        created_at: i64,
    }

    impl Default for Spec {
        fn default() -> Self {
            Spec {
                rank: Rank::E,
                is_boss: false,
                mode: AttemptMode::Progression,
                passed: false,
                avg_score: 0.0,
                weak_areas: &[],
                created_at: 0,
            }
        }
    }

    fn build(specs: Vec<Spec>) -> Vec<DungeonAttempt> {
        specs
            .into_iter()
            .map(|s| {
                let mut a = DungeonAttempt::begin(
                    "p1",
                    s.rank,
                    "backend",
                    s.is_boss,
                    s.mode,
                    vec!["q".into()],
                    s.created_at,
                );
                a.passed = s.passed;
                a.avg_score = s.avg_score;
                a.weak_areas = s.weak_areas.iter().map(|w| w.to_string()).collect();
                a
            })
            .collect()
    }

    #[test]
    fn test_empty_history_is_all_zeroes() {
        let analysis = analyze(Rank::E, &[]);
        assert_eq!(analysis.avg_score, 0.0);
        assert_eq!(analysis.attempt_count, 0);
        assert!(!analysis.failed_boss);
        assert_eq!(analysis.cleared_fundamentals, 0);
        assert_eq!(analysis.current_streak, 0);
        assert!(analysis.top_weaknesses.is_empty());
    }

    #[test]
    fn test_practice_excluded_from_scoring_aggregates() {
        let attempts = build(vec![
            Spec {
                passed: true,
                avg_score: 8.0,
                created_at: 1,
                ..Spec::default()
            },
            Spec {
                mode: AttemptMode::Practice,
                passed: true,
                avg_score: 2.0,
                created_at: 2,
                ..Spec::default()
            },
        ]);
        let analysis = analyze(Rank::E, &attempts);
        assert_eq!(analysis.attempt_count, 1);
        assert_eq!(analysis.avg_score, 8.0);
        assert_eq!(analysis.cleared_fundamentals, 1);
        assert_eq!(analysis.current_streak, 1);
    }

    #[test]
    fn test_practice_still_counts_toward_weakness_tally() {
        let attempts = build(vec![
            Spec {
                weak_areas: &["Caching"],
                created_at: 1,
                ..Spec::default()
            },
            Spec {
                mode: AttemptMode::Practice,
                weak_areas: &["Caching"],
                created_at: 2,
                ..Spec::default()
            },
        ]);
        let analysis = analyze(Rank::E, &attempts);
        assert_eq!(analysis.weakness_count.get("Caching"), Some(&2));
    }

    #[test]
    fn test_failed_boss_only_at_current_rank() {
        let attempts = build(vec![
            Spec {
                rank: Rank::E,
                is_boss: true,
                passed: true,
                avg_score: 7.0,
                created_at: 1,
                ..Spec::default()
            },
            Spec {
                rank: Rank::D,
                is_boss: true,
                passed: false,
                avg_score: 3.0,
                created_at: 2,
                ..Spec::default()
            },
        ]);
        let at_d = analyze(Rank::D, &attempts);
        assert!(at_d.failed_boss);
        assert_eq!(at_d.last_boss_failure, Some(2));

        let at_e = analyze(Rank::E, &attempts);
        assert!(!at_e.failed_boss);
        assert_eq!(at_e.last_boss_failure, None);
    }

    #[test]
    fn test_last_boss_failure_takes_latest() {
        let attempts = build(vec![
            Spec {
                is_boss: true,
                created_at: 100,
                ..Spec::default()
            },
            Spec {
                is_boss: true,
                created_at: 300,
                ..Spec::default()
            },
            Spec {
                is_boss: true,
                created_at: 200,
                ..Spec::default()
            },
        ]);
        let analysis = analyze(Rank::E, &attempts);
        assert_eq!(analysis.last_boss_failure, Some(300));
    }

    #[test]
    fn test_unscored_attempts_drag_the_average_down() {
        let attempts = build(vec![
            Spec {
                passed: true,
                avg_score: 8.0,
                created_at: 1,
                ..Spec::default()
            },
            Spec {
                created_at: 2,
                ..Spec::default()
            },
        ]);
        let analysis = analyze(Rank::E, &attempts);
        assert_eq!(analysis.avg_score, 4.0);
    }

    #[test]
    fn test_top_weaknesses_count_desc_first_seen_ties() {
        let attempts = build(vec![
            Spec {
                weak_areas: &["Caching", "Indexing"],
                created_at: 1,
                ..Spec::default()
            },
            Spec {
                weak_areas: &["Indexing", "Transactions", "System Design"],
                created_at: 2,
                ..Spec::default()
            },
        ]);
        let analysis = analyze(Rank::E, &attempts);
        assert_eq!(
            analysis.top_weaknesses,
            vec![
                ("Indexing".to_string(), 2),
                ("Caching".to_string(), 1),
                ("Transactions".to_string(), 1),
            ]
        );
    }
}
