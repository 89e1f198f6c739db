//! The guild service facade.
//!
//! Wires an injected store and oracle into the attempt lifecycle
//! (register, start, submit) and the read-only projections the routing
//! layer serves. Construction is explicit; there are no globals.

mod lifecycle;
mod queries;
mod types;

pub use types::*;

use crate::guild::WeaknessLexicon;
use crate::oracle::InterviewOracle;
use crate::store::GuildStore;

/// Orchestrates dungeon attempts over a store and an oracle.
pub struct GuildService<S: GuildStore, O: InterviewOracle> {
    store: S,
    oracle: O,
    lexicon: WeaknessLexicon,
}

impl<S: GuildStore, O: InterviewOracle> GuildService<S, O> {
    pub fn new(store: S, oracle: O) -> Self {
        Self::with_lexicon(store, oracle, WeaknessLexicon::default())
    }

    /// Service with a custom weakness keyword table.
    pub fn with_lexicon(store: S, oracle: O, lexicon: WeaknessLexicon) -> Self {
        GuildService {
            store,
            oracle,
            lexicon,
        }
    }

    /// Direct store access, mainly for seeding tests and simulations.
    pub fn store(&self) -> &S {
        &self.store
    }
}
