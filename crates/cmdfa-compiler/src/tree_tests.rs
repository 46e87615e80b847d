use cmdfa_core::NamespaceConstraint;

use crate::Node;
use crate::test_utils::{any, decl, el};

fn repeat_a(min: u32, max: Option<u32>) -> Option<String> {
    Node::repeat(el(&decl("a")), min, max).map(|n| n.to_string())
}

#[test]
fn display_uses_schema_notation() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::sequence_of([
        el(&a),
        Node::zero_or_one(el(&b)),
        Node::zero_or_more(el(&c)),
    ])
    .unwrap();
    assert_eq!(tree.to_string(), "a, b?, c*");

    let tree = Node::one_or_more(Node::choice(el(&a), el(&b)));
    assert_eq!(tree.to_string(), "(a | b)+");

    let tree = Node::choice(
        Node::sequence(el(&a), el(&b)),
        Node::sequence(el(&a), el(&c)),
    );
    assert_eq!(tree.to_string(), "(a, b) | (a, c)");

    let tree = Node::sequence(
        Node::wildcard(any(NamespaceConstraint::Any)),
        Node::choice(el(&b), el(&c)),
    );
    assert_eq!(tree.to_string(), "any(##any), (b | c)");
}

#[test]
fn groups_fold_left() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::sequence_of([el(&a), el(&b), el(&c)]).unwrap();
    let Node::Sequence(left, right) = &tree else {
        panic!("expected a sequence, got {tree:?}");
    };
    assert!(matches!(**left, Node::Sequence(..)));
    assert!(matches!(**right, Node::Leaf(_)));

    assert!(Node::sequence_of([]).is_none());
    assert!(Node::choice_of([]).is_none());
    assert_eq!(
        Node::choice_of([el(&a)]).map(|n| n.to_string()),
        Some("a".to_owned())
    );
}

#[test]
fn repeat_maps_simple_ranges_to_operators() {
    assert_eq!(repeat_a(0, Some(1)).as_deref(), Some("a?"));
    assert_eq!(repeat_a(0, None).as_deref(), Some("a*"));
    assert_eq!(repeat_a(1, None).as_deref(), Some("a+"));
    assert_eq!(repeat_a(1, Some(1)).as_deref(), Some("a"));
}

#[test]
fn repeat_expands_counted_ranges() {
    assert_eq!(repeat_a(2, Some(2)).as_deref(), Some("a, a"));
    assert_eq!(repeat_a(2, Some(3)).as_deref(), Some("a, a, a?"));
    assert_eq!(repeat_a(1, Some(3)).as_deref(), Some("a, (a, a?)?"));
    assert_eq!(repeat_a(0, Some(3)).as_deref(), Some("(a, (a, a?)?)?"));
    assert_eq!(repeat_a(3, None).as_deref(), Some("a, a, a+"));
}

#[test]
fn repeat_with_zero_max_is_absent() {
    assert_eq!(repeat_a(0, Some(0)), None);
    assert_eq!(repeat_a(4, Some(0)), None);
}

#[test]
#[should_panic(expected = "below min_occurs")]
fn repeat_rejects_inverted_range() {
    Node::repeat(el(&decl("a")), 3, Some(2));
}

#[test]
fn repeated_copies_share_particle_identity() {
    let tree = Node::repeat(el(&decl("a")), 2, Some(3)).unwrap();
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 3);
    assert!(leaves.iter().all(|p| p.key() == leaves[0].key()));
}

#[test]
fn leaf_count_and_nullable() {
    let (a, b) = (decl("a"), decl("b"));
    let tree = Node::sequence(el(&a), Node::zero_or_more(el(&b)));
    assert_eq!(tree.leaf_count(), 2);
    assert!(!tree.is_nullable());

    let tree = Node::choice(Node::zero_or_one(el(&a)), el(&b));
    assert!(tree.is_nullable());
    assert!(!Node::one_or_more(el(&a)).is_nullable());
    assert!(Node::one_or_more(Node::zero_or_more(el(&a))).is_nullable());
}

#[test]
fn deep_expansions_walk_without_recursion() {
    let tree = Node::repeat(el(&decl("a")), 0, Some(20_000)).unwrap();
    assert_eq!(tree.leaf_count(), 20_000);
    assert!(tree.is_nullable());
    assert_eq!(tree.leaves().len(), 20_000);

    let copy = tree.clone();
    assert_eq!(copy.leaf_count(), 20_000);
    let rendered = copy.to_string();
    assert!(rendered.starts_with("(a, (a, (a, "));
    assert!(rendered.ends_with("a?)?)?)?"));
    drop(copy);

    let nested = Node::repeat(tree, 2, None).unwrap();
    assert_eq!(nested.leaf_count(), 40_000);
}
