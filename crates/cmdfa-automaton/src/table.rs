//! Row-major `state × column → next state` table.

use crate::StateId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    states: usize,
    columns: usize,
    cells: Box<[Option<StateId>]>,
}

impl TransitionTable {
    /// Build from `states` concatenated rows of `columns` cells each.
    ///
    /// # Panics
    /// Panics if `cells` does not hold exactly `states * columns` entries.
    pub fn from_rows(states: usize, columns: usize, cells: Vec<Option<StateId>>) -> Self {
        let table = Self {
            states,
            columns,
            cells: cells.into_boxed_slice(),
        };
        table.ensure_whole_rows();
        table
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.states
    }

    pub(crate) fn cells_len(&self) -> usize {
        self.cells.len()
    }

    /// # Panics
    /// Panics if `state` is not a state of this table.
    #[inline]
    pub fn row(&self, state: StateId) -> &[Option<StateId>] {
        self.ensure_state(state);
        let start = state.index() * self.columns;
        &self.cells[start..start + self.columns]
    }

    #[inline]
    pub fn get(&self, state: StateId, column: usize) -> Option<StateId> {
        self.row(state).get(column).copied().flatten()
    }
}
