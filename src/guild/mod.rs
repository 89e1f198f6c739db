//! The guild decision core.
//!
//! Everything the Guild Master rules on: attempt history analysis, win
//! streaks, the commission a hunter must take next, boss eligibility,
//! dungeon access, and rank promotion. All of it is pure functions over
//! already-loaded records; nothing here touches the store or the oracle.

pub mod access;
pub mod analyzer;
pub mod boss_gate;
pub mod commissions;
pub mod promotion;
pub mod recommendation;
pub mod streak;
pub mod weakness;

pub use access::*;
pub use analyzer::*;
pub use boss_gate::*;
pub use commissions::*;
pub use promotion::*;
pub use recommendation::*;
pub use streak::*;
pub use weakness::*;
