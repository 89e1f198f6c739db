//! Request and response shapes at the service boundary.

use serde::{Deserialize, Serialize};

use crate::attempt::AttemptMode;
use crate::guild::{CommissionId, Recommendation};
use crate::rank::Rank;

/// Start a dungeon attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct StartRequest {
    pub player_id: String,
    /// Rank letter. Defaults to the player's current rank; a lower rank
    /// makes this a practice run.
    pub rank: Option<String>,
    /// Dungeon type being entered, e.g. "Fundamentals Dungeon".
    pub dungeon_type: String,
    pub is_boss: bool,
}

/// A question as issued to the player.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedQuestion {
    pub id: String,
    pub question: String,
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    pub attempt_id: String,
    pub rank: Rank,
    pub mode: AttemptMode,
    pub questions: Vec<IssuedQuestion>,
}

/// One answer keyed to a question id. Order does not matter.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub attempt_id: String,
    pub answers: Vec<SubmittedAnswer>,
}

/// Graded feedback for one question.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionFeedback {
    pub question_id: String,
    pub score: u8,
    pub feedback: String,
    pub ideal_answer: String,
    pub skipped: bool,
}

/// How the pass/fail decision was reached.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    /// Raw 0-10 average over answered questions; this is what gets stored.
    pub raw_avg: f64,
    /// Raw average scaled onto 0-100 for the threshold comparison.
    pub normalized_avg: f64,
    pub threshold: f64,
    pub margin: f64,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankUpdate {
    pub old_rank: Rank,
    pub new_rank: Rank,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub passed: bool,
    pub score: ScoreBreakdown,
    pub feedback: Vec<QuestionFeedback>,
    pub weak_areas: Vec<String>,
    pub rank_update: Option<RankUpdate>,
}

/// Progression or practice entry in the dungeon catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub rank: Rank,
    pub kind: DungeonKind,
    pub mode: AttemptMode,
    pub locked: bool,
    pub cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dungeon_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_remaining_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_ends_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DungeonKind {
    Normal,
    Boss,
}

/// Where the player stands inside their current rank.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionStatus {
    pub fundamentals_cleared: u32,
    pub fundamentals_required: u32,
    pub boss_unlocked: bool,
    pub boss_cleared: bool,
    pub current_streak: u32,
    pub streak_bonus: u32,
}

/// The Guild Master's assigned next action.
#[derive(Debug, Clone, Serialize)]
pub struct NextStep {
    pub commission: CommissionId,
    pub dungeon_type: &'static str,
    pub description: &'static str,
    pub reason: String,
}

impl NextStep {
    pub fn from_recommendation(recommendation: &Recommendation) -> Self {
        NextStep {
            commission: recommendation.commission.id,
            dungeon_type: recommendation.commission.dungeon_type,
            description: recommendation.commission.description,
            reason: recommendation.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeaknessCount {
    pub tag: String,
    pub count: u32,
}

/// Display digest of the analyzer output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDigest {
    pub avg_score: f64,
    pub top_weaknesses: Vec<WeaknessCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub player_id: String,
    pub rank: Rank,
    pub role: Option<String>,
    pub progression_status: ProgressionStatus,
    pub progression_dungeons: Vec<CatalogEntry>,
    pub practice_dungeons: Vec<CatalogEntry>,
    pub next_step: NextStep,
    pub analysis: AnalysisDigest,
}

/// Canonical progression snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionResponse {
    pub player_id: String,
    pub rank: Rank,
    pub progression: ProgressionStatus,
    pub next_step: NextStep,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub name: String,
    pub rank: Rank,
    pub role: String,
    pub title: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub avg_score: f64,
    pub attempts: usize,
    pub boss_cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecentAttempt {
    pub rank: Rank,
    pub avg_score: f64,
    pub passed: bool,
}

/// At-a-glance view over a player's recent activity.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub rank: Rank,
    pub role: Option<String>,
    pub stats: DashboardStats,
    pub weaknesses: Vec<String>,
    pub recent_attempts: Vec<RecentAttempt>,
}

/// One formatted line of the attempt log.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub dungeon_name: String,
    pub rank: Rank,
    pub date: String,
    pub status: &'static str,
    pub score: String,
    pub rewards: &'static str,
}
