//! Matching engine: the per-session cursor, the matcher and its tracer.

mod cursor;
mod matcher;
mod trace;


pub use cursor::{MatchState, StateRef};
pub use matcher::{Matcher, MatcherBuilder};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
