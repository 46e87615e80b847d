//! Deterministic content-model automata for XML Schema validation.
//!
//! A content model (the allowed sequence of child elements of a complex type)
//! is compiled once into a [`ContentModel`], which is then shared by every
//! validation of that type. Each validation drives its own [`MatchState`].
//!
//! # Example
//!
//! ```
//! use cmdfa_lib::{ContentModel, NoSubstitution, QName};
//!
//! let model = ContentModel::from_json(r#"{
//!     "kind": "sequence",
//!     "items": [
//!         { "kind": "element", "name": "title" },
//!         { "kind": "element", "name": "para", "max_occurs": "unbounded" }
//!     ]
//! }"#).expect("valid content model");
//!
//! let mut cursor = model.start_content_model();
//! for name in ["title", "para", "para"] {
//!     model.one_transition(&QName::local(name), &mut cursor, &NoSubstitution);
//! }
//! assert!(model.end_content_model(&cursor));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod content_model;
pub mod model;

#[cfg(test)]
mod content_model_tests;

pub use content_model::ContentModel;
pub use model::{ModelLoader, RawParticle, parse_model};

pub use cmdfa_automaton::{Automaton, StateId, dump};
pub use cmdfa_compiler::{CompileError, CompileOptions, Compiler, Node, UpaError};
pub use cmdfa_core::{
    Colors, ElementDecl, NamespaceConstraint, NoSubstitution, Particle, ParticleOverlap, QName,
    SchemaOverlap, SubstitutionGroups, SubstitutionTable, Wildcard,
};
pub use cmdfa_vm::{MatchState, Matcher, NoopTracer, PrintTracer, StateRef, Tracer, Verbosity};

/// Errors that can occur while building or checking a content model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Upa(#[from] UpaError),

    /// Malformed content-model description.
    #[error("invalid content model description: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown `max_occurs` keyword, or `max_occurs` below `min_occurs`.
    #[error("invalid occurrence range: {0}")]
    InvalidOccurs(String),

    /// Unknown `##` keyword in a wildcard namespace, or `namespace` combined with `not`.
    #[error("invalid wildcard namespace: {0}")]
    InvalidNamespace(String),

    /// The description allows no particle at all (an empty group or `max_occurs: 0`).
    #[error("content model description denotes no particle")]
    EmptyParticle,
}

/// Result type for content-model operations.
pub type Result<T> = std::result::Result<T, Error>;
