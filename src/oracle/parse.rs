//! Tolerant parsing of raw oracle output.
//!
//! Models rarely honor "JSON only." This module slices the outermost
//! JSON object out of whatever came back (code fences, apologies,
//! trailing prose) before handing it to serde.

use serde::Deserialize;

use crate::constants::RAW_SCORE_MAX;
use crate::oracle::{AnswerEvaluation, OracleError};

#[derive(Deserialize)]
struct QuestionsPayload {
    questions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationPayload {
    score: f64,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    missing_points: Vec<String>,
    #[serde(default)]
    ideal_answer: String,
}

/// The outermost `{ ... }` block of `raw`, if braces exist in order.
pub fn extract_json_block(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then(|| &raw[start..=end])
}

/// Clamps an arbitrary reported score onto the raw 0-10 integer scale.
pub fn clamp_score(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    score.round().clamp(0.0, RAW_SCORE_MAX) as u8
}

/// Parses a question-generation payload: `{"questions": [...]}`.
pub fn parse_questions(raw: &str) -> Result<Vec<String>, OracleError> {
    let block = extract_json_block(raw)
        .ok_or_else(|| OracleError::Malformed("no JSON object in generation output".to_string()))?;
    let payload: QuestionsPayload =
        serde_json::from_str(block).map_err(|e| OracleError::Malformed(e.to_string()))?;
    if payload.questions.is_empty() {
        return Err(OracleError::Malformed(
            "generation returned an empty question list".to_string(),
        ));
    }
    Ok(payload.questions)
}

/// Parses an evaluation payload, clamping the score.
pub fn parse_evaluation(raw: &str) -> Result<AnswerEvaluation, OracleError> {
    let block = extract_json_block(raw)
        .ok_or_else(|| OracleError::Malformed("no JSON object in evaluation output".to_string()))?;
    let payload: EvaluationPayload =
        serde_json::from_str(block).map_err(|e| OracleError::Malformed(e.to_string()))?;
    Ok(AnswerEvaluation {
        score: clamp_score(payload.score),
        feedback: payload.feedback,
        missing_points: payload.missing_points,
        ideal_answer: payload.ideal_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_block_from_code_fence() {
        let raw = "```json\n{\"questions\": [\"What is REST?\"]}\n```";
        let questions = parse_questions(raw).unwrap();
        assert_eq!(questions, ["What is REST?"]);
    }

    #[test]
    fn test_extracts_block_surrounded_by_prose() {
        let raw = "Sure! Here is the evaluation you asked for:\n\
                   {\"score\": 7, \"feedback\": \"solid\", \"missingPoints\": [\"indexing\"], \
                   \"idealAnswer\": \"...\"}\nHope that helps!";
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.score, 7);
        assert_eq!(eval.feedback, "solid");
        assert_eq!(eval.missing_points, ["indexing"]);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let eval = parse_evaluation("{\"score\": 4}").unwrap();
        assert_eq!(eval.score, 4);
        assert!(eval.feedback.is_empty());
        assert!(eval.missing_points.is_empty());
    }

    #[test]
    fn test_missing_score_is_malformed() {
        let err = parse_evaluation("{\"feedback\": \"nice\"}").unwrap_err();
        assert!(matches!(err, OracleError::Malformed(_)));
    }

    #[test]
    fn test_no_braces_is_malformed() {
        assert!(parse_questions("I cannot help with that").is_err());
        assert!(parse_evaluation("score: 7/10").is_err());
    }

    #[test]
    fn test_empty_question_list_is_malformed() {
        assert!(parse_questions("{\"questions\": []}").is_err());
    }

    #[test]
    fn test_score_clamping() {
        assert_eq!(clamp_score(12.0), 10);
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(7.6), 8);
        assert_eq!(clamp_score(7.4), 7);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_nested_braces_take_outermost() {
        let raw = "{\"score\": 5, \"feedback\": \"see {braces} inside\"}";
        let eval = parse_evaluation(raw).unwrap();
        assert_eq!(eval.score, 5);
    }
}
