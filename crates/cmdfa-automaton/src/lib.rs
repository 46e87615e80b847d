#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled content-model automaton.
//!
//! This crate contains:
//! - The immutable artifact produced by the compiler ([`Automaton`])
//! - Its parts: alphabet ([`SymbolMap`]), transition table, final-state flags
//! - A human-readable dump for debugging and snapshot tests
//!
//! Nothing here is mutated after construction, so one automaton can back any
//! number of concurrent validations.

mod automaton;
mod dump;
mod format;
mod invariants;
mod state;
mod symbol;
mod table;


pub use automaton::Automaton;
pub use dump::dump;
pub use format::width_for_count;
pub use state::StateId;
pub use symbol::{ElementSymbol, SymbolMap};
pub use table::TransitionTable;
