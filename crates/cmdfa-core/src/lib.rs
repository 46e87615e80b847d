#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the content-model compiler and matcher.
//!
//! Three groups:
//! - **Particle model**: qualified names, element declarations, wildcards and
//!   their namespace constraints, wrapped in the shared [`Particle`] handle
//! - **Collaborators**: substitution-group resolution and the particle overlap
//!   predicate used by the unique particle attribution check
//! - **Position sets**: fixed-capacity bit vectors for Glushkov positions

mod colors;
mod invariants;
mod particle;
mod position_set;
mod resolve;

pub use colors::Colors;
pub use particle::{
    ElementDecl, NamespaceConstraint, Particle, ParticleKey, ParticleKind, QName, Wildcard,
};
pub use position_set::PositionSet;
pub use resolve::{
    NoSubstitution, ParticleOverlap, SchemaOverlap, SubstitutionGroups, SubstitutionTable,
};
