#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Content-model compiler: particle tree in, deterministic automaton out.
//!
//! Pipeline, run once per distinct content model:
//! 1. `syntax`: number leaf positions, append the end-of-content sentinel,
//!    reduce `nullable` / `firstpos` / `lastpos` bottom-up
//! 2. `followpos`: Glushkov follow sets, filled during that reduction
//! 3. `symbols`: deduplicate leaves into the alphabet, index positions per column
//! 4. `builder`: subset construction with closure interning
//!
//! The UPA checker (`upa`) runs later over the finished [`Automaton`].
//!
//! [`Automaton`]: cmdfa_automaton::Automaton

mod builder;
mod error;
mod followpos;
mod invariants;
mod symbols;
mod syntax;
mod tree;
mod upa;

#[cfg(test)]
mod syntax_tests;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tree_tests;
#[cfg(test)]
mod upa_tests;

pub use builder::{CompileOptions, Compiler, CompilerBuilder, compile};
pub use error::{CompileError, UpaError};
pub use tree::Node;
pub use upa::check_unique_particle_attribution;
