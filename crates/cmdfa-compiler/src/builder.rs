//! Subset construction over Glushkov follow sets.

use indexmap::IndexSet;
use log::{debug, trace};

use cmdfa_automaton::{Automaton, StateId, TransitionTable};
use cmdfa_core::PositionSet;

use crate::symbols::SymbolIndex;
use crate::syntax::augment;
use crate::{CompileError, Node};

/// Knobs for [`Compiler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Upper bound on DFA states (default: unbounded).
    pub(crate) max_states: Option<usize>,
    /// Initial slots reserved for states (default: 8).
    pub(crate) initial_state_capacity: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_states: None,
            initial_state_capacity: 8,
        }
    }
}

impl CompileOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`CompileError::StateLimitExceeded`] past `limit` states.
    pub fn max_states(mut self, limit: usize) -> Self {
        self.max_states = Some(limit);
        self
    }

    /// Set the number of state slots reserved up front.
    pub fn initial_state_capacity(mut self, capacity: usize) -> Self {
        self.initial_state_capacity = capacity;
        self
    }

    pub fn get_max_states(&self) -> Option<usize> {
        self.max_states
    }
    pub fn get_initial_state_capacity(&self) -> usize {
        self.initial_state_capacity
    }
}

/// Compiles content-model trees into [`Automaton`]s.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

/// Builder for [`Compiler`].
#[derive(Debug, Clone, Default)]
pub struct CompilerBuilder {
    options: CompileOptions,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once.
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the state limit.
    pub fn max_states(mut self, limit: usize) -> Self {
        self.options = self.options.max_states(limit);
        self
    }

    /// Set the initial state capacity.
    pub fn initial_state_capacity(mut self, capacity: usize) -> Self {
        self.options = self.options.initial_state_capacity(capacity);
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Build the DFA for `tree`, attaching `user_data` to the result.
    ///
    /// States are numbered in discovery order; state 0 is the closure of
    /// `firstpos(tree, EOC)` and a state is final iff its closure holds the
    /// end-of-content position.
    pub fn compile<U>(&self, tree: &Node, user_data: U) -> Result<Automaton<U>, CompileError> {
        let augmented = augment(tree);
        let capacity = augmented.capacity();
        let follow = &augmented.follow;
        let index = SymbolIndex::build(&augmented.leaves);
        let columns = index.column_count();

        let initial = self.options.initial_state_capacity;
        let mut closures: IndexSet<PositionSet> = IndexSet::with_capacity(initial);
        let mut finals: Vec<bool> = Vec::with_capacity(initial);
        let mut cells: Vec<Option<StateId>> = Vec::with_capacity(initial * columns);

        closures.insert(augmented.root.first_pos.clone());
        self.check_state_limit(closures.len())?;

        let mut target = PositionSet::new(capacity);
        let mut current = 0;
        while current < closures.len() {
            let closure = closures[current].clone();
            finals.push(closure.contains(augmented.end_of_content));

            for column in 0..columns {
                target.clear();
                for &p in index.positions(column) {
                    if closure.contains(p) {
                        target.union_with(&follow[p]);
                    }
                }
                if target.is_empty() {
                    cells.push(None);
                    continue;
                }

                let next = match closures.get_index_of(&target) {
                    Some(existing) => existing,
                    None => {
                        grow_by_half(&mut closures, &mut finals, &mut cells, columns);
                        let (id, _) = closures.insert_full(target.clone());
                        trace!("state {id} = {target:?} (from {current} on #{column})");
                        self.check_state_limit(closures.len())?;
                        id
                    }
                };
                cells.push(Some(StateId::new(next)));
            }
            current += 1;
        }

        let states = closures.len();
        debug!("compiled content model `{tree}`: {states} states, {columns} symbols");

        let table = TransitionTable::from_rows(states, columns, cells);
        Ok(Automaton::new(
            index.into_symbols(),
            table,
            finals,
            user_data,
        ))
    }

    fn check_state_limit(&self, states: usize) -> Result<(), CompileError> {
        match self.options.max_states {
            Some(limit) if states > limit => Err(CompileError::StateLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// Compile `tree` with default options.
pub fn compile<U>(tree: &Node, user_data: U) -> Result<Automaton<U>, CompileError> {
    Compiler::new().compile(tree, user_data)
}

/// Reserve ~50% more state slots once the closure table is full.
fn grow_by_half(
    closures: &mut IndexSet<PositionSet>,
    finals: &mut Vec<bool>,
    cells: &mut Vec<Option<StateId>>,
    columns: usize,
) {
    if closures.len() < closures.capacity() {
        return;
    }
    let extra = (closures.capacity() / 2).max(1);
    closures.reserve_exact(extra);
    finals.reserve_exact(extra);
    cells.reserve_exact(extra * columns);
}
