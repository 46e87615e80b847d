#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime matcher for compiled content models.
//!
//! This crate walks a [`cmdfa_automaton::Automaton`] one child element at a
//! time. The automaton is shared and read-only; every validation session owns
//! its [`MatchState`].

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    MatchState, Matcher, MatcherBuilder, NoopTracer, PrintTracer, StateRef, Tracer, Verbosity,
};
