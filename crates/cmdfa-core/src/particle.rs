//! Particle model: the leaves of a content model.
//!
//! Declarations are owned by the surrounding schema and shared by `Arc`.
//! A content model refers to them through [`Particle`], whose identity is the
//! shared allocation rather than the declaration's contents.

use std::fmt;
use std::sync::Arc;

/// Expanded element name: optional namespace URI plus local part.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct QName {
    #[serde(default)]
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_owned),
            local: local.into(),
        }
    }

    /// Name in no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local: local.into(),
        }
    }

    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Element declaration as seen by the content model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDecl {
    pub name: QName,
}

impl ElementDecl {
    pub fn new(name: QName) -> Self {
        Self { name }
    }

    /// Shorthand for a shared declaration, the form leaves hold.
    pub fn shared(name: QName) -> Arc<Self> {
        Arc::new(Self::new(name))
    }
}

/// Namespace constraint of a wildcard.
///
/// `None` entries stand for "no namespace" (`##local`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceConstraint {
    /// `##any`
    Any,
    /// Every namespace except the listed ones (`##other`, or `##any` minus a list).
    Not(Vec<Option<String>>),
    /// Exactly the listed namespaces.
    List(Vec<Option<String>>),
}

impl NamespaceConstraint {
    pub fn accepts_namespace(&self, namespace: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Not(excluded) => !contains_namespace(excluded, namespace),
            Self::List(allowed) => contains_namespace(allowed, namespace),
        }
    }

    /// Whether newly declared global elements may start matching this constraint.
    pub fn is_loose(&self) -> bool {
        matches!(self, Self::Not(_) | Self::List(_))
    }

    /// Conservative emptiness test for the intersection of two constraints.
    ///
    /// Only answers whether some namespace satisfies both; the intersected
    /// constraint itself is never built.
    pub fn may_intersect(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => true,
            (Self::Not(_), Self::Not(_)) => true,
            (Self::List(a), Self::List(b)) => a.iter().any(|ns| b.contains(ns)),
            (Self::List(list), Self::Not(excluded)) | (Self::Not(excluded), Self::List(list)) => {
                list.iter().any(|ns| !excluded.contains(ns))
            }
        }
    }
}

fn contains_namespace(list: &[Option<String>], namespace: Option<&str>) -> bool {
    list.iter().any(|entry| entry.as_deref() == namespace)
}

fn write_namespace_list(f: &mut fmt::Formatter<'_>, list: &[Option<String>]) -> fmt::Result {
    for (i, ns) in list.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        f.write_str(ns.as_deref().unwrap_or("##local"))?;
    }
    Ok(())
}

impl fmt::Display for NamespaceConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("##any"),
            Self::Not(excluded) => {
                f.write_str("##not ")?;
                write_namespace_list(f, excluded)
            }
            Self::List(allowed) if allowed.is_empty() => f.write_str("##none"),
            Self::List(allowed) => write_namespace_list(f, allowed),
        }
    }
}

/// Wildcard declaration (`<xs:any>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wildcard {
    pub constraint: NamespaceConstraint,
}

impl Wildcard {
    pub fn new(constraint: NamespaceConstraint) -> Self {
        Self { constraint }
    }

    pub fn shared(constraint: NamespaceConstraint) -> Arc<Self> {
        Arc::new(Self::new(constraint))
    }

    pub fn accepts_namespace(&self, namespace: Option<&str>) -> bool {
        self.constraint.accepts_namespace(namespace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Element,
    Wildcard,
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Element => "element",
            Self::Wildcard => "any",
        })
    }
}

/// Identity of a particle: which shared declaration, and of which kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleKey {
    addr: usize,
    kind: ParticleKind,
}

impl ParticleKey {
    pub fn kind(self) -> ParticleKind {
        self.kind
    }
}

/// Leaf particle of a content model.
///
/// Equality is identity: two particles are equal when they share the same
/// declaration allocation, regardless of what the declarations contain.
#[derive(Debug, Clone)]
pub enum Particle {
    Element(Arc<ElementDecl>),
    Wildcard(Arc<Wildcard>),
}

impl Particle {
    pub fn kind(&self) -> ParticleKind {
        match self {
            Self::Element(_) => ParticleKind::Element,
            Self::Wildcard(_) => ParticleKind::Wildcard,
        }
    }

    pub fn key(&self) -> ParticleKey {
        let addr = match self {
            Self::Element(decl) => Arc::as_ptr(decl) as usize,
            Self::Wildcard(wildcard) => Arc::as_ptr(wildcard) as usize,
        };
        ParticleKey {
            addr,
            kind: self.kind(),
        }
    }

    pub fn as_element(&self) -> Option<&Arc<ElementDecl>> {
        match self {
            Self::Element(decl) => Some(decl),
            Self::Wildcard(_) => None,
        }
    }

    pub fn as_wildcard(&self) -> Option<&Arc<Wildcard>> {
        match self {
            Self::Element(_) => None,
            Self::Wildcard(wildcard) => Some(wildcard),
        }
    }
}

impl PartialEq for Particle {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Particle {}

impl From<Arc<ElementDecl>> for Particle {
    fn from(decl: Arc<ElementDecl>) -> Self {
        Self::Element(decl)
    }
}

impl From<Arc<Wildcard>> for Particle {
    fn from(wildcard: Arc<Wildcard>) -> Self {
        Self::Wildcard(wildcard)
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(decl) => write!(f, "{}", decl.name),
            Self::Wildcard(wildcard) => write!(f, "any({})", wildcard.constraint),
        }
    }
}
