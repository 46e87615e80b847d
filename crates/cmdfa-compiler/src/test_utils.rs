//! Test utilities and snapshot macros.

use std::sync::Arc;

use cmdfa_core::{Colors, ElementDecl, NamespaceConstraint, QName, Wildcard};

use crate::{Node, compile};

pub(crate) fn decl(local: &str) -> Arc<ElementDecl> {
    ElementDecl::shared(QName::local(local))
}

pub(crate) fn el(decl: &Arc<ElementDecl>) -> Node {
    Node::element(decl.clone())
}

pub(crate) fn any(constraint: NamespaceConstraint) -> Arc<Wildcard> {
    Wildcard::shared(constraint)
}

pub(crate) fn ns(uri: &str) -> Option<String> {
    Some(uri.to_owned())
}

/// `tree --- dump`, the text compared by [`shot_automaton!`].
pub(crate) fn render(tree: &Node) -> String {
    let automaton = compile(tree, ()).expect("test model compiles");
    let dump = cmdfa_automaton::dump(&automaton, Colors::OFF);
    format!("{tree}\n---\n{dump}")
}

/// Snapshot test for the compiled automaton of a tree.
#[macro_export]
macro_rules! shot_automaton {
    ($tree:expr, @$snapshot:literal) => {{
        let output = $crate::test_utils::render(&$tree);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
