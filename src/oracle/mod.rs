//! The interview oracle boundary.
//!
//! Question generation and answer scoring are black boxes behind one
//! trait. The service never sees a transport or parse failure as a hard
//! error: generation falls back to canned questions and evaluation to a
//! deterministic zero-score result.

pub mod ollama;
pub mod parse;
pub mod scripted;

pub use ollama::{OllamaConfig, OllamaOracle};
pub use scripted::ScriptedOracle;

use serde::Serialize;
use thiserror::Error;

use crate::constants::COMPRESSED_FEEDBACK_LEN;
use crate::rank::{rank_config, Rank};

/// Scored evaluation of a single answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerEvaluation {
    /// Raw score on the 0-10 scale.
    pub score: u8,
    pub feedback: String,
    pub missing_points: Vec<String>,
    pub ideal_answer: String,
}

impl AnswerEvaluation {
    /// Compact digest for log lines: score, truncated feedback, and the
    /// number of missing points instead of their full text.
    pub fn digest(&self) -> EvaluationDigest {
        EvaluationDigest {
            score: self.score,
            feedback: self.feedback.chars().take(COMPRESSED_FEEDBACK_LEN).collect(),
            missing: self.missing_points.len(),
        }
    }
}

/// Shrunk evaluation used for structured logging.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationDigest {
    pub score: u8,
    pub feedback: String,
    pub missing: usize,
}

/// Failures crossing the oracle boundary.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle transport failure: {0}")]
    Transport(String),
    #[error("oracle returned malformed output: {0}")]
    Malformed(String),
}

/// An external system that writes and grades interview questions.
pub trait InterviewOracle {
    /// Returns a question batch for the rank and role. Batch size is the
    /// oracle's best effort; callers pad or truncate to the configured
    /// count.
    fn generate_questions(
        &self,
        rank: Rank,
        role: &str,
        is_boss: bool,
    ) -> Result<Vec<String>, OracleError>;

    /// Grades one answer against one question at the given rank's
    /// strictness.
    fn evaluate_answer(
        &self,
        rank: Rank,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, OracleError>;
}

/// Canned questions used when generation fails, deterministic on rank
/// and role. Cycles the rank's topic list.
pub fn fallback_questions(rank: Rank, role: &str, count: usize) -> Vec<String> {
    let topics = rank_config(rank).topics;
    (0..count)
        .map(|i| {
            let topic = topics[i % topics.len()];
            format!(
                "Explain the following topic as it applies to a {role}: {topic}. \
                 Include a concrete example."
            )
        })
        .collect()
}

/// Deterministic stand-in for evaluator output that could not be parsed.
pub fn malformed_evaluation() -> AnswerEvaluation {
    AnswerEvaluation {
        score: 0,
        feedback: "The evaluator returned malformed output, so this answer could not be scored."
            .to_string(),
        missing_points: vec![
            "Core concepts could not be assessed".to_string(),
            "Depth of understanding could not be assessed".to_string(),
        ],
        ideal_answer: "Not available for this question.".to_string(),
    }
}
