//! Collaborator interfaces consumed by the matcher and the UPA checker.
//!
//! Both are owned by the surrounding schema: substitution groups come from its
//! global element registry, and particle overlap depends on that registry plus
//! wildcard semantics. Reference implementations are provided for callers
//! without a registry of their own.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{ElementDecl, Particle, QName, Wildcard};

/// Substitution-group lookup.
pub trait SubstitutionGroups {
    /// Declaration to use when `name` appears where `head` is permitted:
    /// `head` itself for an exact name match, a registered substitute
    /// otherwise, `None` when neither applies.
    fn matching_decl(&self, name: &QName, head: &Arc<ElementDecl>) -> Option<Arc<ElementDecl>>;

    /// Declarations that may substitute for `head`, excluding `head`.
    fn members(&self, head: &Arc<ElementDecl>) -> Vec<Arc<ElementDecl>>;
}

impl<T: SubstitutionGroups + ?Sized> SubstitutionGroups for &T {
    fn matching_decl(&self, name: &QName, head: &Arc<ElementDecl>) -> Option<Arc<ElementDecl>> {
        (*self).matching_decl(name, head)
    }

    fn members(&self, head: &Arc<ElementDecl>) -> Vec<Arc<ElementDecl>> {
        (*self).members(head)
    }
}

/// Resolver for schemas without substitution groups: exact names only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitution;

impl SubstitutionGroups for NoSubstitution {
    fn matching_decl(&self, name: &QName, head: &Arc<ElementDecl>) -> Option<Arc<ElementDecl>> {
        (head.name == *name).then(|| head.clone())
    }

    fn members(&self, _head: &Arc<ElementDecl>) -> Vec<Arc<ElementDecl>> {
        Vec::new()
    }
}

/// Map-backed substitution groups, keyed by head name.
///
/// Only direct membership is recorded; callers register every transitive
/// member explicitly.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    groups: HashMap<QName, Vec<Arc<ElementDecl>>>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, head: &ElementDecl, member: Arc<ElementDecl>) {
        let members = self.groups.entry(head.name.clone()).or_default();
        if !members.iter().any(|m| Arc::ptr_eq(m, &member)) {
            members.push(member);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl SubstitutionGroups for SubstitutionTable {
    fn matching_decl(&self, name: &QName, head: &Arc<ElementDecl>) -> Option<Arc<ElementDecl>> {
        if head.name == *name {
            return Some(head.clone());
        }
        self.groups
            .get(&head.name)?
            .iter()
            .find(|member| member.name == *name)
            .cloned()
    }

    fn members(&self, head: &Arc<ElementDecl>) -> Vec<Arc<ElementDecl>> {
        self.groups.get(&head.name).cloned().unwrap_or_default()
    }
}

/// Predicate deciding whether two particles can match a common element.
pub trait ParticleOverlap {
    fn overlaps(&self, a: &Particle, b: &Particle) -> bool;
}

impl<T: ParticleOverlap + ?Sized> ParticleOverlap for &T {
    fn overlaps(&self, a: &Particle, b: &Particle) -> bool {
        (*self).overlaps(a, b)
    }
}

/// Overlap per the schema rules, driven by a substitution-group resolver.
///
/// - element/element: same name, or a member of either group carries the other's name
/// - element/wildcard: the wildcard accepts the namespace of the element or of any member
/// - wildcard/wildcard: some namespace satisfies both constraints
pub struct SchemaOverlap<'r, R: ?Sized> {
    resolver: &'r R,
}

impl<'r, R: SubstitutionGroups + ?Sized> SchemaOverlap<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    fn elements_overlap(&self, a: &Arc<ElementDecl>, b: &Arc<ElementDecl>) -> bool {
        a.name == b.name
            || self.resolver.members(a).iter().any(|m| m.name == b.name)
            || self.resolver.members(b).iter().any(|m| m.name == a.name)
    }

    fn element_wildcard_overlap(&self, element: &Arc<ElementDecl>, wildcard: &Wildcard) -> bool {
        wildcard.accepts_namespace(element.name.namespace_uri())
            || self
                .resolver
                .members(element)
                .iter()
                .any(|m| wildcard.accepts_namespace(m.name.namespace_uri()))
    }
}

impl<R: SubstitutionGroups + ?Sized> ParticleOverlap for SchemaOverlap<'_, R> {
    fn overlaps(&self, a: &Particle, b: &Particle) -> bool {
        match (a, b) {
            (Particle::Element(x), Particle::Element(y)) => self.elements_overlap(x, y),
            (Particle::Element(e), Particle::Wildcard(w))
            | (Particle::Wildcard(w), Particle::Element(e)) => self.element_wildcard_overlap(e, w),
            (Particle::Wildcard(x), Particle::Wildcard(y)) => {
                x.constraint.may_intersect(&y.constraint)
            }
        }
    }
}
