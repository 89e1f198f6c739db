//! Dungeon attempt records.
//!
//! An attempt is created when a run starts and scored exactly once on
//! submission. Scoring state is carried by `avg_score` and `passed`
//! rather than a separate status column.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rank::Rank;

/// Whether an attempt counts toward promotion.
///
/// Fixed when the attempt starts: a run at the player's current rank is
/// progression, anything else is practice and never touches the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptMode {
    Progression,
    Practice,
}

/// One issued question inside an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: String,
}

/// Difficulty label shown for the question at `index`.
pub fn difficulty_label(index: usize, is_boss: bool) -> &'static str {
    if is_boss {
        "boss"
    } else {
        match index {
            0 => "easy",
            1 => "medium",
            _ => "hard",
        }
    }
}

/// A single dungeon run, from entry to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonAttempt {
    pub id: String,
    pub player_id: String,
    /// Rank the dungeon was taken at, not the player's rank today.
    pub rank: Rank,
    /// Role label the questions were generated for.
    #[serde(default)]
    pub role: String,
    pub is_boss: bool,
    pub mode: AttemptMode,
    pub questions: Vec<Question>,
    /// Mean raw score across answered questions, 0-10. Zero until scored.
    #[serde(default)]
    pub avg_score: f64,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub weak_areas: Vec<String>,
    pub created_at: i64,
}

impl DungeonAttempt {
    /// Opens a new attempt with freshly issued questions. Question ids are
    /// assigned positionally: "q1", "q2", and so on.
    pub fn begin(
        player_id: &str,
        rank: Rank,
        role: &str,
        is_boss: bool,
        mode: AttemptMode,
        question_texts: Vec<String>,
        now: i64,
    ) -> Self {
        let questions = question_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Question {
                id: format!("q{}", i + 1),
                text,
                difficulty: difficulty_label(i, is_boss).to_string(),
            })
            .collect();
        DungeonAttempt {
            id: Uuid::new_v4().to_string(),
            player_id: player_id.to_string(),
            rank,
            role: role.to_string(),
            is_boss,
            mode,
            questions,
            avg_score: 0.0,
            passed: false,
            weak_areas: Vec::new(),
            created_at: now,
        }
    }

    /// True once scoring has landed. A submission where every answer
    /// scored zero and the run failed is indistinguishable from an
    /// unscored attempt under this test.
    pub fn is_scored(&self) -> bool {
        self.avg_score > 0.0 || self.passed
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
