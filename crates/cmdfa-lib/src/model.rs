//! JSON description of a content model.
//!
//! Two layers:
//! - **Deserialization layer**: [`RawParticle`], a 1:1 mapping of the JSON
//! - **Loading layer**: [`ModelLoader`], which interns element declarations and
//!   expands occurrence ranges into a [`Node`] tree
//!
//! ```json
//! { "kind": "sequence", "items": [
//!     { "kind": "element", "name": "a" },
//!     { "kind": "any", "namespace": "##other", "min_occurs": 0, "max_occurs": "unbounded" }
//! ] }
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use log::trace;

use cmdfa_compiler::Node;
use cmdfa_core::{ElementDecl, NamespaceConstraint, QName, Wildcard};

use crate::{Error, Result};

// ============================================================================
// Deserialization Layer
// ============================================================================

/// One particle of a content-model description.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawParticle {
    Element {
        name: String,
        #[serde(default)]
        namespace: Option<String>,
        #[serde(default = "one")]
        min_occurs: u32,
        #[serde(default)]
        max_occurs: RawMaxOccurs,
    },
    Any {
        #[serde(default)]
        namespace: Option<RawNamespace>,
        #[serde(default)]
        not: Option<Vec<String>>,
        #[serde(default = "one")]
        min_occurs: u32,
        #[serde(default)]
        max_occurs: RawMaxOccurs,
    },
    Sequence {
        items: Vec<RawParticle>,
        #[serde(default = "one")]
        min_occurs: u32,
        #[serde(default)]
        max_occurs: RawMaxOccurs,
    },
    Choice {
        items: Vec<RawParticle>,
        #[serde(default = "one")]
        min_occurs: u32,
        #[serde(default)]
        max_occurs: RawMaxOccurs,
    },
}

impl RawParticle {
    pub fn min_occurs(&self) -> u32 {
        match self {
            Self::Element { min_occurs, .. }
            | Self::Any { min_occurs, .. }
            | Self::Sequence { min_occurs, .. }
            | Self::Choice { min_occurs, .. } => *min_occurs,
        }
    }

    pub fn max_occurs(&self) -> &RawMaxOccurs {
        match self {
            Self::Element { max_occurs, .. }
            | Self::Any { max_occurs, .. }
            | Self::Sequence { max_occurs, .. }
            | Self::Choice { max_occurs, .. } => max_occurs,
        }
    }
}

fn one() -> u32 {
    1
}

/// `max_occurs`: a count or the `"unbounded"` keyword.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum RawMaxOccurs {
    Bounded(u32),
    Keyword(String),
}

impl Default for RawMaxOccurs {
    fn default() -> Self {
        Self::Bounded(1)
    }
}

/// Wildcard `namespace`: a `##` keyword, a single URI, or a list of either.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum RawNamespace {
    Keyword(String),
    List(Vec<String>),
}

/// Parse a content-model description.
pub fn parse_model(json: &str) -> std::result::Result<RawParticle, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Loading Layer
// ============================================================================

/// Turns [`RawParticle`]s into [`Node`] trees.
///
/// Element declarations are interned by name, so every reference to a name
/// shares one declaration and therefore one alphabet column. Each `any`
/// becomes its own wildcard.
#[derive(Debug, Default)]
pub struct ModelLoader {
    target_namespace: Option<String>,
    decls: IndexMap<QName, Arc<ElementDecl>>,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader resolving `##other` and `##targetNamespace` against `namespace`.
    pub fn with_target_namespace(namespace: impl Into<String>) -> Self {
        Self {
            target_namespace: Some(namespace.into()),
            ..Self::default()
        }
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Declaration for `name`, created on first use.
    pub fn declare(&mut self, name: QName) -> Arc<ElementDecl> {
        self.decls
            .entry(name)
            .or_insert_with_key(|name| {
                trace!("declared element {name}");
                ElementDecl::shared(name.clone())
            })
            .clone()
    }

    pub fn decl(&self, name: &QName) -> Option<&Arc<ElementDecl>> {
        self.decls.get(name)
    }

    /// Interned declarations in order of first use.
    pub fn decls(&self) -> impl Iterator<Item = &Arc<ElementDecl>> {
        self.decls.values()
    }

    /// Build the tree for `raw`.
    pub fn load(&mut self, raw: &RawParticle) -> Result<Node> {
        self.load_particle(raw)?.ok_or(Error::EmptyParticle)
    }

    /// `None` when the particle is absent: `max_occurs: 0` or an empty group.
    fn load_particle(&mut self, raw: &RawParticle) -> Result<Option<Node>> {
        let max = max_occurs(raw.min_occurs(), raw.max_occurs())?;
        let term = match raw {
            RawParticle::Element {
                name, namespace, ..
            } => {
                let decl = self.declare(QName::new(namespace.as_deref(), name.as_str()));
                Some(Node::element(decl))
            }
            RawParticle::Any { namespace, not, .. } => {
                let constraint = self.constraint(namespace.as_ref(), not.as_deref())?;
                Some(Node::wildcard(Wildcard::shared(constraint)))
            }
            RawParticle::Sequence { items, .. } => Node::sequence_of(self.load_items(items)?),
            RawParticle::Choice { items, .. } => Node::choice_of(self.load_items(items)?),
        };
        Ok(term.and_then(|node| Node::repeat(node, raw.min_occurs(), max)))
    }

    fn load_items(&mut self, items: &[RawParticle]) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            if let Some(node) = self.load_particle(item)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    fn constraint(
        &self,
        namespace: Option<&RawNamespace>,
        not: Option<&[String]>,
    ) -> Result<NamespaceConstraint> {
        let constraint = match (namespace, not) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidNamespace(
                    "`namespace` and `not` are mutually exclusive".to_owned(),
                ));
            }
            (None, Some(excluded)) => NamespaceConstraint::Not(self.namespace_list(excluded)?),
            (None, None) => NamespaceConstraint::Any,
            (Some(RawNamespace::List(list)), None) => {
                NamespaceConstraint::List(self.namespace_list(list)?)
            }
            (Some(RawNamespace::Keyword(keyword)), None) => match keyword.as_str() {
                "##any" => NamespaceConstraint::Any,
                "##other" => {
                    let mut excluded = vec![None];
                    if self.target_namespace.is_some() {
                        excluded.insert(0, self.target_namespace.clone());
                    }
                    NamespaceConstraint::Not(excluded)
                }
                _ => NamespaceConstraint::List(vec![self.namespace_token(keyword)?]),
            },
        };
        Ok(constraint)
    }

    fn namespace_list(&self, tokens: &[String]) -> Result<Vec<Option<String>>> {
        let mut list: Vec<Option<String>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let namespace = self.namespace_token(token)?;
            if !list.contains(&namespace) {
                list.push(namespace);
            }
        }
        Ok(list)
    }

    /// One list entry: `##local`, `##targetNamespace` or a URI.
    fn namespace_token(&self, token: &str) -> Result<Option<String>> {
        match token {
            "##local" => Ok(None),
            "##targetNamespace" => Ok(self.target_namespace.clone()),
            _ if token.starts_with("##") => Err(Error::InvalidNamespace(format!(
                "`{token}` is not allowed here"
            ))),
            uri => Ok(Some(uri.to_owned())),
        }
    }
}

fn max_occurs(min: u32, max: &RawMaxOccurs) -> Result<Option<u32>> {
    match max {
        RawMaxOccurs::Bounded(max) if *max < min => Err(Error::InvalidOccurs(
            format!("max_occurs {max} is below min_occurs {min}"),
        )),
        RawMaxOccurs::Bounded(max) => Ok(Some(*max)),
        RawMaxOccurs::Keyword(keyword) if keyword == "unbounded" => Ok(None),
        RawMaxOccurs::Keyword(keyword) => Err(Error::InvalidOccurs(format!(
            "unknown max_occurs `{keyword}`"
        ))),
    }
}
