use crate::Node;
use crate::symbols::SymbolIndex;
use crate::syntax::{Leaf, augment};
use crate::test_utils::{decl, el};

fn a_opt_b_star_c() -> Node {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    Node::sequence_of([
        el(&a),
        Node::zero_or_one(el(&b)),
        Node::zero_or_more(el(&c)),
    ])
    .unwrap()
}

#[test]
fn augment_appends_end_of_content() {
    let augmented = augment(&a_opt_b_star_c());

    assert_eq!(augmented.capacity(), 4);
    assert_eq!(augmented.end_of_content, 3);
    assert!(matches!(augmented.leaves[3], Leaf::EndOfContent));
    assert_eq!(augmented.leaves[1].particle().unwrap().to_string(), "b");
    assert!(!augmented.root.nullable);
    assert_eq!(format!("{:?}", augmented.root.first_pos), "{0}");
    assert_eq!(format!("{:?}", augmented.root.last_pos), "{3}");
}

#[test]
fn nullable_body_exposes_end_of_content_first() {
    let augmented = augment(&Node::zero_or_more(el(&decl("a"))));
    assert_eq!(format!("{:?}", augmented.root.first_pos), "{0, 1}");
}

#[test]
fn follow_sets() {
    let augmented = augment(&a_opt_b_star_c());
    assert_eq!(format!("{:?}", augmented.follow), "[{1, 2, 3}, {2, 3}, {2, 3}, {}]");
}

#[test]
fn follow_sets_through_plus() {
    let (a, b) = (decl("a"), decl("b"));
    let augmented = augment(&Node::one_or_more(Node::choice(el(&a), el(&b))));
    assert_eq!(format!("{:?}", augmented.follow), "[{0, 1, 2}, {0, 1, 2}, {}]");
}

#[test]
fn symbol_index_merges_by_identity() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::choice(
        Node::sequence(el(&a), el(&b)),
        Node::sequence(el(&a), el(&c)),
    );
    let augmented = augment(&tree);
    let index = SymbolIndex::build(&augmented.leaves);

    assert_eq!(index.column_count(), 3);
    assert_eq!(index.positions(0), &[0, 2]);
    assert_eq!(index.positions(1), &[1]);
    assert_eq!(index.positions(2), &[3]);

    let symbols = index.into_symbols();
    let names: Vec<_> = symbols
        .iter()
        .map(|(_, s)| s.particle().to_string())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn equal_names_stay_distinct_columns() {
    let tree = Node::sequence(el(&decl("a")), el(&decl("a")));
    let augmented = augment(&tree);
    let index = SymbolIndex::build(&augmented.leaves);
    assert_eq!(index.column_count(), 2);
}
