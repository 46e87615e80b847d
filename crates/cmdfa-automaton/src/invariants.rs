//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Automaton, StateId, TransitionTable};

pub(crate) fn ensure_state_index(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or_else(|_| panic!("StateId: index {index} does not fit the state id range"))
}

impl TransitionTable {
    pub(crate) fn ensure_whole_rows(&self) {
        let expected = self.state_count() * self.column_count();
        let actual = self.cells_len();
        if expected != actual {
            panic!(
                "TransitionTable: {actual} cells for {} states × {} columns",
                self.state_count(),
                self.column_count()
            );
        }
    }

    pub(crate) fn ensure_state(&self, state: StateId) {
        if state.index() >= self.state_count() {
            panic!(
                "TransitionTable: state {state} not found ({} states)",
                self.state_count()
            );
        }
    }
}

impl<U> Automaton<U> {
    pub(crate) fn ensure_consistent(&self) {
        if self.table().state_count() != self.state_count() {
            panic!(
                "Automaton: table has {} states but {} final flags",
                self.table().state_count(),
                self.state_count()
            );
        }
        if self.table().column_count() != self.symbols().len() {
            panic!(
                "Automaton: table has {} columns but alphabet has {} symbols",
                self.table().column_count(),
                self.symbols().len()
            );
        }
        let states = self.state_count();
        for from in 0..states {
            let from = StateId::new(from);
            if let Some((column, to)) = self.transitions(from).find(|(_, to)| to.index() >= states) {
                panic!(
                    "Automaton: transition {from} #{column}→{to} targets a state outside \
                     0..{states}"
                );
            }
        }
    }

    pub(crate) fn ensure_state(&self, state: StateId) -> usize {
        if state.index() >= self.state_count() {
            panic!(
                "Automaton: state {state} not found ({} states)",
                self.state_count()
            );
        }
        state.index()
    }
}
