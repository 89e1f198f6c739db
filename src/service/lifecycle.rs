//! The attempt lifecycle: register, start, submit.
//!
//! An attempt has exactly two states, unscored and scored, and moves
//! between them once. Everything else here is gatekeeping around that
//! single transition.

use std::collections::HashSet;

use chrono::Utc;
use log::{debug, info, warn};

use crate::attempt::{AttemptMode, DungeonAttempt};
use crate::constants::SCORE_MULTIPLIER;
use crate::error::GuildError;
use crate::guild::{analyze, evaluate_boss_gate, evaluate_dungeon_access, evaluate_promotion, recommend};
use crate::oracle::{fallback_questions, malformed_evaluation, InterviewOracle};
use crate::player::Player;
use crate::rank::{rank_config, Rank};
use crate::service::{
    GuildService, IssuedQuestion, QuestionFeedback, RankUpdate, ScoreBreakdown, StartRequest,
    StartResponse, SubmitRequest, SubmitResponse,
};
use crate::store::{GuildStore, ScoredOutcome, StoreError};

impl<S: GuildStore, O: InterviewOracle> GuildService<S, O> {
    /// Registers a new player at rank E.
    pub fn register_player(&self, role: Option<&str>) -> Result<Player, GuildError> {
        let player = Player::register(role, Utc::now().timestamp());
        self.store.insert_player(&player)?;
        info!(
            "registered player {} role={}",
            player.id,
            player.role.as_deref().unwrap_or("-")
        );
        Ok(player)
    }

    /// Opens a dungeon attempt: resolves rank and mode, runs the
    /// progression gates, pulls a question batch, and persists the
    /// attempt unscored.
    pub fn start_attempt(&self, request: &StartRequest) -> Result<StartResponse, GuildError> {
        if request.player_id.trim().is_empty() {
            return Err(GuildError::Validation("playerId is required".to_string()));
        }
        if request.dungeon_type.trim().is_empty() {
            return Err(GuildError::Validation("dungeonType is required".to_string()));
        }

        let player = self
            .store
            .player(&request.player_id)?
            .ok_or_else(|| GuildError::PlayerNotFound(request.player_id.clone()))?;

        let rank = match &request.rank {
            Some(raw) => Rank::parse(raw).ok_or_else(|| GuildError::UnknownRank(raw.clone()))?,
            None => player.rank,
        };
        if rank > player.rank {
            return Err(GuildError::Forbidden {
                reason: format!(
                    "Cannot enter a {rank}-Rank dungeon at rank {}",
                    player.rank
                ),
            });
        }
        let mode = if rank == player.rank {
            AttemptMode::Progression
        } else {
            AttemptMode::Practice
        };

        let now = Utc::now().timestamp();

        // Practice runs skip the guild gates; the rank-below check above
        // is their only restriction.
        if mode == AttemptMode::Progression {
            let attempts = self.store.attempts_for_player(&player.id)?;
            let analysis = analyze(player.rank, &attempts);
            let recommendation = recommend(&analysis, player.rank);

            if request.is_boss {
                let verdict = evaluate_boss_gate(&analysis, &recommendation, now);
                if !verdict.allowed {
                    info!("boss start refused for {}: {}", player.id, verdict.reason);
                    return Err(GuildError::Forbidden {
                        reason: verdict.reason,
                    });
                }
            }

            let access = evaluate_dungeon_access(&request.dungeon_type, &recommendation);
            if !access.allowed {
                info!("dungeon start refused for {}: {}", player.id, access.reason);
                return Err(GuildError::Forbidden {
                    reason: access.reason,
                });
            }
        }

        let count = rank_config(rank).question_count;
        let questions = self.issue_questions(rank, player.role_label(), request.is_boss, count);

        let attempt = DungeonAttempt::begin(
            &player.id,
            rank,
            player.role_label(),
            request.is_boss,
            mode,
            questions,
            now,
        );
        self.store.insert_attempt(&attempt)?;

        info!(
            "attempt {} started: player={} rank={rank} boss={} mode={mode:?}",
            attempt.id, player.id, request.is_boss
        );

        Ok(StartResponse {
            attempt_id: attempt.id.clone(),
            rank,
            mode,
            questions: attempt
                .questions
                .iter()
                .map(|q| IssuedQuestion {
                    id: q.id.clone(),
                    question: q.text.clone(),
                    difficulty: q.difficulty.clone(),
                })
                .collect(),
        })
    }

    /// Scores a submission and, for progression attempts, weighs the
    /// result for promotion. Single-shot per attempt.
    pub fn submit_attempt(&self, request: &SubmitRequest) -> Result<SubmitResponse, GuildError> {
        let attempt = self
            .store
            .attempt(&request.attempt_id)?
            .ok_or_else(|| GuildError::AttemptNotFound(request.attempt_id.clone()))?;

        if attempt.is_scored() {
            return Err(GuildError::AlreadySubmitted);
        }

        // Validate the whole submission before any oracle work.
        let unknown: Vec<&str> = request
            .answers
            .iter()
            .filter(|a| attempt.question(&a.question_id).is_none())
            .map(|a| a.question_id.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(GuildError::Validation(format!(
                "unknown question ids: {}",
                unknown.join(", ")
            )));
        }
        let mut seen = HashSet::new();
        for answer in &request.answers {
            if !seen.insert(answer.question_id.as_str()) {
                return Err(GuildError::Validation(format!(
                    "duplicate answer for question {}",
                    answer.question_id
                )));
            }
        }

        // Grade in snapshot order; blank or missing answers are skipped
        // and never reach the oracle.
        let mut feedback = Vec::with_capacity(attempt.questions.len());
        let mut total_score = 0u32;
        let mut answered = 0usize;
        let mut missing_points: Vec<String> = Vec::new();

        for question in &attempt.questions {
            let answer = request
                .answers
                .iter()
                .find(|a| a.question_id == question.id)
                .map(|a| a.answer.trim())
                .unwrap_or("");

            if answer.is_empty() {
                feedback.push(QuestionFeedback {
                    question_id: question.id.clone(),
                    score: 0,
                    feedback: "Skipped - no answer provided.".to_string(),
                    ideal_answer: String::new(),
                    skipped: true,
                });
                continue;
            }

            let evaluation = match self.oracle.evaluate_answer(attempt.rank, &question.text, answer)
            {
                Ok(evaluation) => evaluation,
                Err(err) => {
                    warn!(
                        "evaluation failed for {} on attempt {} ({err}), recording zero",
                        question.id, attempt.id
                    );
                    malformed_evaluation()
                }
            };
            debug!(
                "{} evaluation: {}",
                question.id,
                serde_json::to_string(&evaluation.digest()).unwrap_or_default()
            );

            total_score += u32::from(evaluation.score);
            answered += 1;
            missing_points.extend(evaluation.missing_points.iter().cloned());
            feedback.push(QuestionFeedback {
                question_id: question.id.clone(),
                score: evaluation.score,
                feedback: evaluation.feedback,
                ideal_answer: evaluation.ideal_answer,
                skipped: false,
            });
        }

        let raw_avg = if answered > 0 {
            f64::from(total_score) / answered as f64
        } else {
            0.0
        };
        let normalized_avg = raw_avg * SCORE_MULTIPLIER;
        let config = rank_config(attempt.rank);
        let threshold = if attempt.is_boss {
            config.pass_score + config.boss_bonus
        } else {
            config.pass_score
        };
        let passed = normalized_avg >= threshold;
        let weak_areas = self
            .lexicon
            .extract(missing_points.iter().map(String::as_str));

        // The store re-checks the unscored state under its own lock, so
        // a racing submit loses here rather than double-scoring.
        let outcome = ScoredOutcome {
            avg_score: raw_avg,
            passed,
            weak_areas: weak_areas.clone(),
        };
        let scored = match self.store.complete_attempt(&attempt.id, &outcome) {
            Ok(scored) => scored,
            Err(StoreError::AlreadyScored(_)) => return Err(GuildError::AlreadySubmitted),
            Err(other) => return Err(other.into()),
        };

        info!(
            "attempt {} scored: raw={raw_avg:.1} normalized={normalized_avg:.0} threshold={threshold:.0} passed={passed}",
            scored.id
        );

        let mut rank_update = None;
        if scored.mode == AttemptMode::Progression {
            let player = self
                .store
                .player(&scored.player_id)?
                .ok_or_else(|| GuildError::PlayerNotFound(scored.player_id.clone()))?;
            let verdict = evaluate_promotion(player.rank, &scored);
            if verdict.promoted {
                self.store.set_player_rank(&player.id, verdict.new_rank)?;
                info!(
                    "player {} promoted {} -> {}",
                    player.id, player.rank, verdict.new_rank
                );
                rank_update = Some(RankUpdate {
                    old_rank: player.rank,
                    new_rank: verdict.new_rank,
                    reason: verdict.reason,
                });
            }
        }

        Ok(SubmitResponse {
            passed,
            score: ScoreBreakdown {
                raw_avg,
                normalized_avg,
                threshold,
                margin: normalized_avg - threshold,
                answered,
                total: attempt.questions.len(),
            },
            feedback,
            weak_areas,
            rank_update,
        })
    }

    /// Pulls `count` questions from the oracle. Overruns are truncated,
    /// shortfalls padded from the canned list, and a failed generation
    /// falls back to canned questions entirely.
    fn issue_questions(&self, rank: Rank, role: &str, is_boss: bool, count: usize) -> Vec<String> {
        match self.oracle.generate_questions(rank, role, is_boss) {
            Ok(mut questions) => {
                if questions.len() > count {
                    questions.truncate(count);
                } else if questions.len() < count {
                    warn!(
                        "oracle returned {}/{} questions for rank {rank}, padding",
                        questions.len(),
                        count
                    );
                    let canned = fallback_questions(rank, role, count);
                    questions.extend(canned.into_iter().skip(questions.len()));
                }
                questions
            }
            Err(err) => {
                warn!("question generation failed ({err}), using canned questions");
                fallback_questions(rank, role, count)
            }
        }
    }
}
