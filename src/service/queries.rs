//! Read-only projections over the store.
//!
//! Everything here is render-ready: the caller never re-derives a rule
//! from raw records. Gates are evaluated server-side and shipped as
//! verdict fields.

use chrono::Utc;

use crate::attempt::{AttemptMode, DungeonAttempt};
use crate::constants::{DASHBOARD_RECENT_ATTEMPTS, LEADERBOARD_SIZE};
use crate::error::GuildError;
use crate::guild::{
    analyze, evaluate_boss_gate, evaluate_dungeon_access, recommend, AccessStatus, AccessVerdict,
    Analysis, BossVerdict, Recommendation,
};
use crate::oracle::InterviewOracle;
use crate::player::Player;
use crate::rank::rank_config;
use crate::service::{
    AnalysisDigest, CatalogEntry, CatalogResponse, DashboardResponse, DashboardStats, DungeonKind,
    GuildService, HistoryEntry, LeaderboardEntry, NextStep, ProgressionResponse, ProgressionStatus,
    RecentAttempt, WeaknessCount,
};
use crate::store::GuildStore;

/// Shared working set for the progression projections: one store read,
/// every gate evaluated once.
struct ProgressionView {
    player: Player,
    attempts: Vec<DungeonAttempt>,
    analysis: Analysis,
    recommendation: Recommendation,
    boss_verdict: BossVerdict,
    boss_cleared: bool,
}

impl<S: GuildStore, O: InterviewOracle> GuildService<S, O> {
    fn progression_view(&self, player_id: &str, now: i64) -> Result<ProgressionView, GuildError> {
        let player = self
            .store
            .player(player_id)?
            .ok_or_else(|| GuildError::PlayerNotFound(player_id.to_string()))?;
        let attempts = self.store.attempts_for_player(&player.id)?;
        let analysis = analyze(player.rank, &attempts);
        let recommendation = recommend(&analysis, player.rank);
        let boss_verdict = evaluate_boss_gate(&analysis, &recommendation, now);
        let boss_cleared = attempts
            .iter()
            .any(|a| a.rank == player.rank && a.is_boss && a.passed);
        Ok(ProgressionView {
            player,
            attempts,
            analysis,
            recommendation,
            boss_verdict,
            boss_cleared,
        })
    }

    fn progression_status(&self, view: &ProgressionView) -> ProgressionStatus {
        ProgressionStatus {
            fundamentals_cleared: view.analysis.cleared_fundamentals,
            fundamentals_required: rank_config(view.player.rank).fundamentals_required,
            boss_unlocked: view.boss_verdict.allowed,
            boss_cleared: view.boss_cleared,
            current_streak: view.analysis.current_streak,
            streak_bonus: view.analysis.streak_bonus,
        }
    }

    /// Render-ready dungeon list for one player: progression dungeons
    /// at their rank, everything below as practice, the assigned next
    /// step, and an analysis digest.
    pub fn catalog(&self, player_id: &str) -> Result<CatalogResponse, GuildError> {
        let view = self.progression_view(player_id, Utc::now().timestamp())?;
        let rank = view.player.rank;
        let config = rank_config(rank);

        let mut progression_dungeons = Vec::with_capacity(config.normal.len() + 1);
        // Attempts do not record which normal dungeon they ran, so every
        // normal entry shares one cleared flag.
        let normals_cleared = view.analysis.cleared_fundamentals > 0;
        for dungeon in config.normal {
            progression_dungeons.push(CatalogEntry {
                id: dungeon.id,
                name: dungeon.name,
                description: dungeon.description,
                rank,
                kind: DungeonKind::Normal,
                mode: AttemptMode::Progression,
                locked: false,
                cleared: normals_cleared,
                dungeon_type: Some(dungeon.dungeon_type),
                reason: None,
                cooldown_remaining_minutes: None,
                cooldown_ends_at: None,
            });
        }
        progression_dungeons.push(CatalogEntry {
            id: config.boss.id,
            name: config.boss.name,
            description: config.boss.description,
            rank,
            kind: DungeonKind::Boss,
            mode: AttemptMode::Progression,
            locked: !view.boss_verdict.allowed,
            cleared: view.boss_cleared,
            dungeon_type: None,
            reason: if view.boss_verdict.allowed {
                None
            } else {
                Some(view.boss_verdict.reason.clone())
            },
            cooldown_remaining_minutes: view.boss_verdict.cooldown_remaining_minutes,
            cooldown_ends_at: view.boss_verdict.cooldown_ends_at,
        });

        let mut practice_dungeons = Vec::new();
        for &lower in rank.lower_ranks() {
            let cfg = rank_config(lower);
            for dungeon in cfg.normal {
                practice_dungeons.push(CatalogEntry {
                    id: dungeon.id,
                    name: dungeon.name,
                    description: dungeon.description,
                    rank: lower,
                    kind: DungeonKind::Normal,
                    mode: AttemptMode::Practice,
                    locked: false,
                    cleared: false,
                    dungeon_type: Some(dungeon.dungeon_type),
                    reason: None,
                    cooldown_remaining_minutes: None,
                    cooldown_ends_at: None,
                });
            }
            // Beaten bosses stay open for practice runs.
            practice_dungeons.push(CatalogEntry {
                id: cfg.boss.id,
                name: cfg.boss.name,
                description: cfg.boss.description,
                rank: lower,
                kind: DungeonKind::Boss,
                mode: AttemptMode::Practice,
                locked: false,
                cleared: false,
                dungeon_type: None,
                reason: None,
                cooldown_remaining_minutes: None,
                cooldown_ends_at: None,
            });
        }

        let progression_status = self.progression_status(&view);
        let analysis = AnalysisDigest {
            avg_score: view.analysis.avg_score,
            top_weaknesses: view
                .analysis
                .top_weaknesses
                .iter()
                .map(|(tag, count)| WeaknessCount {
                    tag: tag.clone(),
                    count: *count,
                })
                .collect(),
        };

        Ok(CatalogResponse {
            player_id: view.player.id.clone(),
            rank,
            role: view.player.role.clone(),
            progression_status,
            progression_dungeons,
            practice_dungeons,
            next_step: NextStep::from_recommendation(&view.recommendation),
            analysis,
        })
    }

    /// Canonical progression snapshot: rank, fundamentals tally, boss
    /// state, and the assigned next step. Never mutates anything.
    pub fn progression(&self, player_id: &str) -> Result<ProgressionResponse, GuildError> {
        let view = self.progression_view(player_id, Utc::now().timestamp())?;
        Ok(ProgressionResponse {
            player_id: view.player.id.clone(),
            rank: view.player.rank,
            progression: self.progression_status(&view),
            next_step: NextStep::from_recommendation(&view.recommendation),
        })
    }

    /// The boss and access gates as a standalone verdict, for callers
    /// that want to show a lock state without starting anything.
    pub fn check_access(
        &self,
        player_id: &str,
        dungeon_type: &str,
        is_boss: bool,
    ) -> Result<AccessVerdict, GuildError> {
        if dungeon_type.trim().is_empty() {
            return Err(GuildError::Validation("dungeonType is required".to_string()));
        }
        let view = self.progression_view(player_id, Utc::now().timestamp())?;

        if is_boss && !view.boss_verdict.allowed {
            return Ok(AccessVerdict {
                allowed: false,
                status: AccessStatus::Locked,
                reason: view.boss_verdict.reason.clone(),
            });
        }

        Ok(evaluate_dungeon_access(
            dungeon_type,
            &view.recommendation,
        ))
    }

    /// Top players by rank, newest registration first inside a rank.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, GuildError> {
        let mut players = self.store.players()?;
        players.sort_by(|a, b| b.rank.cmp(&a.rank).then(b.created_at.cmp(&a.created_at)));
        Ok(players
            .iter()
            .take(LEADERBOARD_SIZE)
            .enumerate()
            .map(|(index, p)| LeaderboardEntry {
                position: index + 1,
                name: p.display_name(),
                rank: p.rank,
                role: p
                    .role
                    .clone()
                    .unwrap_or_else(|| "Unknown Class".to_string()),
                title: p.class_title(),
                id: p.id.clone(),
            })
            .collect())
    }

    /// At-a-glance stats over the player's five most recent attempts.
    pub fn dashboard(&self, player_id: &str) -> Result<DashboardResponse, GuildError> {
        let player = self
            .store
            .player(player_id)?
            .ok_or_else(|| GuildError::PlayerNotFound(player_id.to_string()))?;
        let mut attempts = self.store.attempts_for_player(&player.id)?;
        // Timestamps are whole seconds; insertion order breaks the ties.
        attempts.reverse();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attempts.truncate(DASHBOARD_RECENT_ATTEMPTS);

        let avg_score = attempts.iter().map(|a| a.avg_score).sum::<f64>()
            / attempts.len().max(1) as f64;

        Ok(DashboardResponse {
            rank: player.rank,
            role: player.role.clone(),
            stats: DashboardStats {
                avg_score,
                attempts: attempts.len(),
                boss_cleared: attempts.iter().any(|a| a.is_boss && a.passed),
            },
            weaknesses: player.weaknesses.clone(),
            recent_attempts: attempts
                .iter()
                .map(|a| RecentAttempt {
                    rank: a.rank,
                    avg_score: a.avg_score,
                    passed: a.passed,
                })
                .collect(),
        })
    }

    /// Full attempt log as formatted lines, newest first.
    pub fn history(&self, player_id: &str) -> Result<Vec<HistoryEntry>, GuildError> {
        let player = self
            .store
            .player(player_id)?
            .ok_or_else(|| GuildError::PlayerNotFound(player_id.to_string()))?;
        let mut attempts = self.store.attempts_for_player(&player.id)?;
        attempts.reverse();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(attempts
            .iter()
            .map(|a| {
                let dungeon_name = if a.is_boss {
                    format!("{}-Rank Boss Room", a.rank)
                } else if a.mode == AttemptMode::Practice {
                    format!("{}-Rank Training", a.rank)
                } else {
                    format!("{}-Rank Dungeon", a.rank)
                };
                let date = chrono::DateTime::from_timestamp(a.created_at, 0)
                    .map(|dt| dt.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "Unknown".to_string());
                HistoryEntry {
                    id: a.id.clone(),
                    dungeon_name,
                    rank: a.rank,
                    date,
                    status: if a.passed { "VICTORY" } else { "DEFEAT" },
                    score: score_display(a.avg_score),
                    rewards: if a.passed { "EXP + Status" } else { "-" },
                }
            })
            .collect())
    }
}

/// Formats a raw average as "7/10" or "7.5/10", one decimal at most.
fn score_display(avg_score: f64) -> String {
    let rounded = (avg_score * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}/10", rounded as i64)
    } else {
        format!("{rounded}/10")
    }
}
