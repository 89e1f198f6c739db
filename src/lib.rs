//! Guildhall - Interview Dungeon Progression Core
//!
//! Players register with the guild, clear rank-scoped dungeons of
//! AI-generated interview questions, and climb the E..SS ladder by
//! defeating rank bosses. This crate owns the progression decisions
//! (analysis, recommendation, eligibility gates, promotion) and the
//! attempt lifecycle state machine. HTTP routing and the language
//! model behind the oracle trait are external collaborators.

pub mod attempt;
pub mod constants;
pub mod error;
pub mod guild;
pub mod oracle;
pub mod player;
pub mod rank;
pub mod service;
pub mod store;
