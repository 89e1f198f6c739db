//! Deterministic oracle for tests and offline simulation.
//!
//! Grading follows answer length so a simulation can express "skill" as
//! answer verbosity without a model in the loop.

use crate::oracle::{AnswerEvaluation, InterviewOracle, OracleError};
use crate::rank::{rank_config, Rank};

// Answer-length grading tiers.
const SHORT_ANSWER_LEN: usize = 20;
const SOLID_ANSWER_LEN: usize = 80;
const DEEP_ANSWER_LEN: usize = 160;

#[derive(Debug, Clone)]
pub struct ScriptedOracle {
    /// Fixed score for every evaluation; answer length decides if unset.
    pub fixed_score: Option<u8>,
    /// Overrides the rank-configured batch size.
    pub question_count: Option<usize>,
    /// Missing points attached to evaluations scoring below six.
    pub weak_points: Vec<String>,
    /// Fail every generation call with a transport error.
    pub fail_generation: bool,
    /// Fail every evaluation call with a malformed-output error.
    pub fail_evaluation: bool,
}

impl Default for ScriptedOracle {
    fn default() -> Self {
        ScriptedOracle {
            fixed_score: None,
            question_count: None,
            weak_points: vec![
                "Missing architecture considerations".to_string(),
                "No mention of transaction handling".to_string(),
            ],
            fail_generation: false,
            fail_evaluation: false,
        }
    }
}

impl ScriptedOracle {
    pub fn new() -> Self {
        ScriptedOracle::default()
    }

    /// Oracle that grades every answer with the same score.
    pub fn with_score(score: u8) -> Self {
        ScriptedOracle {
            fixed_score: Some(score),
            ..ScriptedOracle::default()
        }
    }

    fn score_by_length(answer: &str) -> u8 {
        let len = answer.trim().len();
        if len <= SHORT_ANSWER_LEN {
            3
        } else if len <= SOLID_ANSWER_LEN {
            7
        } else if len <= DEEP_ANSWER_LEN {
            8
        } else {
            9
        }
    }
}

impl InterviewOracle for ScriptedOracle {
    fn generate_questions(
        &self,
        rank: Rank,
        role: &str,
        is_boss: bool,
    ) -> Result<Vec<String>, OracleError> {
        if self.fail_generation {
            return Err(OracleError::Transport(
                "scripted generation failure".to_string(),
            ));
        }
        let config = rank_config(rank);
        let count = self.question_count.unwrap_or(config.question_count);
        let questions = (0..count)
            .map(|i| {
                let topic = config.topics[i % config.topics.len()];
                if is_boss {
                    format!("Boss trial: defend your approach to {topic} as a {role} under production pressure.")
                } else {
                    format!("Describe how a {role} approaches {topic}.")
                }
            })
            .collect();
        Ok(questions)
    }

    fn evaluate_answer(
        &self,
        _rank: Rank,
        _question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, OracleError> {
        if self.fail_evaluation {
            return Err(OracleError::Malformed(
                "scripted evaluation failure".to_string(),
            ));
        }
        let score = self
            .fixed_score
            .unwrap_or_else(|| Self::score_by_length(answer));
        let missing_points = if score < 6 {
            self.weak_points.clone()
        } else {
            Vec::new()
        };
        Ok(AnswerEvaluation {
            score,
            feedback: format!("Scored {score}/10 against the expected coverage."),
            missing_points,
            ideal_answer: "A strong answer explains the mechanism, names the trade-offs, and \
                           grounds both in a concrete example."
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_tiers() {
        let oracle = ScriptedOracle::new();
        let grade = |answer: &str| oracle.evaluate_answer(Rank::E, "q", answer).unwrap().score;
        assert_eq!(grade("short"), 3);
        assert_eq!(grade(&"a".repeat(50)), 7);
        assert_eq!(grade(&"a".repeat(120)), 8);
        assert_eq!(grade(&"a".repeat(400)), 9);
    }

    #[test]
    fn test_whitespace_does_not_inflate_length() {
        let oracle = ScriptedOracle::new();
        let padded = format!("   {}   ", "a".repeat(10));
        let eval = oracle.evaluate_answer(Rank::E, "q", &padded).unwrap();
        assert_eq!(eval.score, 3);
    }

    #[test]
    fn test_fixed_score_overrides_length() {
        let oracle = ScriptedOracle::with_score(9);
        let eval = oracle.evaluate_answer(Rank::E, "q", "x").unwrap();
        assert_eq!(eval.score, 9);
        assert!(eval.missing_points.is_empty());
    }

    #[test]
    fn test_low_scores_report_weak_points() {
        let oracle = ScriptedOracle::with_score(4);
        let eval = oracle.evaluate_answer(Rank::E, "q", "whatever").unwrap();
        assert_eq!(eval.missing_points.len(), 2);
    }

    #[test]
    fn test_generation_respects_rank_count_and_override() {
        let oracle = ScriptedOracle::new();
        assert_eq!(
            oracle.generate_questions(Rank::SS, "backend", false).unwrap().len(),
            6
        );

        let short = ScriptedOracle {
            question_count: Some(2),
            ..ScriptedOracle::default()
        };
        assert_eq!(
            short.generate_questions(Rank::SS, "backend", false).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_failure_flags() {
        let broken = ScriptedOracle {
            fail_generation: true,
            fail_evaluation: true,
            ..ScriptedOracle::default()
        };
        assert!(matches!(
            broken.generate_questions(Rank::E, "r", false),
            Err(OracleError::Transport(_))
        ));
        assert!(matches!(
            broken.evaluate_answer(Rank::E, "q", "a"),
            Err(OracleError::Malformed(_))
        ));
    }
}
