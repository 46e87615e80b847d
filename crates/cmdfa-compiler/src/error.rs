//! Errors raised while compiling or checking a content model.

use cmdfa_automaton::StateId;
use cmdfa_core::Particle;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Subset construction needed more states than `CompileOptions::max_states` allows.
    #[error("content model needs more than {limit} DFA states")]
    StateLimitExceeded { limit: usize },
}

/// Schema error: the content model is not deterministic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpaError {
    #[error(
        "content model violates unique particle attribution: \
         `{first}` and `{second}` can both match the next element in state {state}"
    )]
    Ambiguous {
        first: Particle,
        second: Particle,
        state: StateId,
    },
}
