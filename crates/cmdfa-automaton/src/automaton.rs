//! The compiled, immutable content-model automaton.

use cmdfa_core::{Particle, ParticleKind};

use crate::{ElementSymbol, StateId, SymbolMap, TransitionTable};

/// Deterministic automaton for one content model.
///
/// `U` is opaque data carried over from the content-model tree (typically a
/// handle to the owning type definition), returned untouched by
/// [`Automaton::user_data`].
#[derive(Debug, Clone)]
pub struct Automaton<U = ()> {
    symbols: SymbolMap,
    table: TransitionTable,
    finals: Box<[bool]>,
    user_data: U,
}

impl<U> Automaton<U> {
    /// # Panics
    /// Panics if the parts disagree on state or column counts.
    pub fn new(symbols: SymbolMap, table: TransitionTable, finals: Vec<bool>, user_data: U) -> Self {
        let automaton = Self {
            symbols,
            table,
            finals: finals.into_boxed_slice(),
            user_data,
        };
        automaton.ensure_consistent();
        automaton
    }

    #[inline]
    pub fn start_state(&self) -> StateId {
        StateId::START
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.finals.len()
    }

    #[inline]
    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    #[inline]
    pub fn symbol(&self, column: usize) -> Option<&ElementSymbol> {
        self.symbols.get(column)
    }

    #[inline]
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// # Panics
    /// Panics if `state` does not belong to this automaton.
    #[inline]
    pub fn is_final_state(&self, state: StateId) -> bool {
        self.finals[self.ensure_state(state)]
    }

    #[inline]
    pub fn transition(&self, state: StateId, column: usize) -> Option<StateId> {
        self.table.get(state, column)
    }

    #[inline]
    pub fn row(&self, state: StateId) -> &[Option<StateId>] {
        self.table.row(state)
    }

    /// Columns with a transition out of `state`, with their targets, in alphabet order.
    pub fn transitions(&self, state: StateId) -> impl Iterator<Item = (usize, StateId)> + '_ {
        self.row(state)
            .iter()
            .enumerate()
            .filter_map(|(column, next)| next.map(|n| (column, n)))
    }

    /// Particles with a transition out of `state`, in alphabet order.
    pub fn particles_from(&self, state: StateId) -> Vec<Particle> {
        self.transitions(state)
            .filter_map(|(column, _)| self.symbol(column))
            .map(|s| s.particle().clone())
            .collect()
    }

    /// Whether some wildcard column has a `##not` or list constraint.
    ///
    /// Caches holding this automaton must re-run the UPA check once new global
    /// element declarations appear, since those may now intersect the wildcard.
    pub fn has_loose_wildcard(&self) -> bool {
        self.symbols.iter().any(|(_, symbol)| match symbol.particle() {
            Particle::Wildcard(w) => w.constraint.is_loose(),
            Particle::Element(_) => false,
        })
    }

    pub fn wildcard_count(&self) -> usize {
        self.symbols
            .iter()
            .filter(|(_, s)| s.kind() == ParticleKind::Wildcard)
            .count()
    }

    #[inline]
    pub fn user_data(&self) -> &U {
        &self.user_data
    }

    pub fn into_user_data(self) -> U {
        self.user_data
    }
}
