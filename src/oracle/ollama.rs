//! Oracle backed by a local Ollama-style completion endpoint.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::oracle::{parse, AnswerEvaluation, InterviewOracle, OracleError};
use crate::rank::{rank_config, Rank};

/// Connection settings for the completion endpoint.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub model: String,
    /// Per-request timeout in seconds. Local models are slow.
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        OllamaConfig {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral:latest".to_string(),
            timeout_secs: 120,
        }
    }
}

/// `InterviewOracle` over `POST {base_url}/api/generate`.
pub struct OllamaOracle {
    config: OllamaConfig,
    agent: ureq::Agent,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaOracle {
    pub fn new(config: OllamaConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        OllamaOracle { config, agent }
    }

    fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let url = format!("{}/api/generate", self.config.base_url);
        debug!(
            "oracle request: model={} prompt_len={}",
            self.config.model,
            prompt.len()
        );
        let response: GenerateResponse = self
            .agent
            .post(&url)
            .send_json(GenerateRequest {
                model: &self.config.model,
                prompt,
                stream: false,
            })
            .map_err(|e| OracleError::Transport(e.to_string()))?
            .into_json()
            .map_err(|e| OracleError::Malformed(e.to_string()))?;
        Ok(response.response)
    }

    fn question_prompt(rank: Rank, role: &str, is_boss: bool, count: usize) -> String {
        let difficulty = if is_boss { " HARD" } else { "" };
        format!(
            "You are a senior technical interviewer.\n\
             \n\
             Generate {count}{difficulty} interview questions.\n\
             \n\
             Constraints:\n\
             - Role: {role}\n\
             - Rank: {rank}\n\
             - No multiple choice\n\
             - Real interview style\n\
             - Increasing difficulty\n\
             - No explanations, only questions\n\
             \n\
             Output as JSON:\n\
             {{\n  \"questions\": string[]\n}}\n"
        )
    }

    fn evaluation_prompt(rank: Rank, question: &str, answer: &str) -> String {
        let strictness = rank_config(rank).strictness;
        format!(
            "You are a strict technical interviewer.\n\
             \n\
             Rank: {rank}\n\
             Strictness: {strictness}/100\n\
             \n\
             Question:\n{question}\n\
             \n\
             Candidate Answer:\n{answer}\n\
             \n\
             Evaluate the answer strictly.\n\
             \n\
             RULES (MANDATORY):\n\
             - Respond with VALID JSON ONLY\n\
             - Do NOT include explanations\n\
             - Do NOT include markdown\n\
             - Do NOT include code fences\n\
             - Do NOT include any text before or after JSON\n\
             - Escape all quotes properly\n\
             - Output MUST start with {{ and end with }}\n\
             \n\
             Scoring Rules:\n\
             - Score from 0 to 10\n\
             - Penalize vagueness heavily\n\
             - Penalize shallow explanations\n\
             - Be harsher for higher ranks\n\
             - No praise or encouragement\n\
             \n\
             Return ONLY this JSON format:\n\
             {{\n\
             \"score\": number,\n\
             \"feedback\": string,\n\
             \"missingPoints\": string[],\n\
             \"idealAnswer\": string\n\
             }}\n"
        )
    }
}

impl InterviewOracle for OllamaOracle {
    fn generate_questions(
        &self,
        rank: Rank,
        role: &str,
        is_boss: bool,
    ) -> Result<Vec<String>, OracleError> {
        let count = rank_config(rank).question_count;
        let prompt = Self::question_prompt(rank, role, is_boss, count);
        let raw = self.complete(&prompt)?;
        parse::parse_questions(&raw)
    }

    fn evaluate_answer(
        &self,
        rank: Rank,
        question: &str,
        answer: &str,
    ) -> Result<AnswerEvaluation, OracleError> {
        let prompt = Self::evaluation_prompt(rank, question, answer);
        let raw = self.complete(&prompt)?;
        parse::parse_evaluation(&raw)
    }
}
