use std::cell::Cell;

use cmdfa_automaton::StateId;
use cmdfa_core::{
    ElementDecl, NamespaceConstraint, NoSubstitution, Particle, ParticleOverlap, QName,
    SchemaOverlap, SubstitutionTable,
};

use crate::test_utils::{any, decl, el, ns};
use crate::{Node, UpaError, check_unique_particle_attribution, compile};

/// Counts predicate calls and answers with a fixed verdict.
struct Counting {
    calls: Cell<usize>,
    verdict: bool,
}

impl Counting {
    fn new(verdict: bool) -> Self {
        Self {
            calls: Cell::new(0),
            verdict,
        }
    }
}

impl ParticleOverlap for Counting {
    fn overlaps(&self, _a: &Particle, _b: &Particle) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.verdict
    }
}

fn check(tree: &Node) -> Result<bool, UpaError> {
    let automaton = compile(tree, ()).unwrap();
    check_unique_particle_attribution(&automaton, &SchemaOverlap::new(&NoSubstitution))
}

#[test]
fn deterministic_model_passes() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::sequence_of([
        el(&a),
        Node::zero_or_one(el(&b)),
        Node::zero_or_more(el(&c)),
    ])
    .unwrap();
    assert_eq!(check(&tree), Ok(false));
}

#[test]
fn shared_particle_is_not_a_conflict() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::choice(
        Node::sequence(el(&a), el(&b)),
        Node::sequence(el(&a), el(&c)),
    );
    assert_eq!(check(&tree), Ok(false));
}

#[test]
fn same_name_different_declarations_conflict() {
    let first = decl("a");
    let second = decl("a");
    let tree = Node::sequence(Node::zero_or_one(el(&first)), el(&second));

    let err = check(&tree).unwrap_err();
    assert_eq!(
        err,
        UpaError::Ambiguous {
            first: Particle::from(first),
            second: Particle::from(second),
            state: StateId::START,
        }
    );
    assert_eq!(
        err.to_string(),
        "content model violates unique particle attribution: \
         `a` and `a` can both match the next element in state 0"
    );
}

#[test]
fn conflict_reported_in_later_state() {
    let (a, b1, b2) = (decl("a"), decl("b"), decl("b"));
    let tree = Node::sequence(
        el(&a),
        Node::choice(el(&b1), Node::sequence(el(&b2), el(&a))),
    );
    let err = check(&tree).unwrap_err();
    let UpaError::Ambiguous { state, .. } = err;
    assert_eq!(state, StateId::new(1));
}

#[test]
fn negated_wildcard_overlaps_foreign_element() {
    let x = ElementDecl::shared(QName::new(Some("urn:z"), "x"));
    let not_y = any(NamespaceConstraint::Not(vec![ns("urn:y")]));
    let tree = Node::sequence(el(&x), Node::zero_or_more(Node::wildcard(not_y.clone())));
    assert_eq!(check(&tree), Ok(true));

    let tree = Node::sequence(
        Node::zero_or_more(Node::wildcard(not_y)),
        el(&x),
    );
    assert!(check(&tree).is_err());
}

#[test]
fn listed_wildcard_is_loose_but_disjoint() {
    let x = ElementDecl::shared(QName::new(Some("urn:z"), "x"));
    let only_y = any(NamespaceConstraint::List(vec![ns("urn:y")]));
    let tree = Node::choice(el(&x), Node::wildcard(only_y));
    assert_eq!(check(&tree), Ok(true));
}

#[test]
fn any_wildcard_is_not_loose() {
    let a = decl("a");
    let tree = Node::sequence(
        el(&a),
        Node::zero_or_more(Node::wildcard(any(NamespaceConstraint::Any))),
    );
    assert_eq!(check(&tree), Ok(false));
}

#[test]
fn substitution_group_members_conflict_with_head() {
    let head = decl("shape");
    let circle = decl("circle");
    let mut groups = SubstitutionTable::new();
    groups.add(&head, circle.clone());

    let tree = Node::choice(el(&head), el(&circle));
    let automaton = compile(&tree, ()).unwrap();
    assert!(check_unique_particle_attribution(&automaton, &SchemaOverlap::new(&groups)).is_err());
    assert_eq!(
        check_unique_particle_attribution(&automaton, &SchemaOverlap::new(&NoSubstitution)),
        Ok(false)
    );
}

#[test]
fn verdicts_are_memoized_per_pair() {
    let (a, b) = (decl("a"), decl("b"));
    let automaton = compile(&Node::one_or_more(Node::choice(el(&a), el(&b))), ()).unwrap();
    assert_eq!(automaton.state_count(), 2);

    let overlap = Counting::new(false);
    assert_eq!(check_unique_particle_attribution(&automaton, &overlap), Ok(false));
    assert_eq!(overlap.calls.get(), 1);
}

#[test]
fn first_conflict_wins() {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::choice_of([el(&a), el(&b), el(&c)]).unwrap();
    let automaton = compile(&tree, ()).unwrap();

    let overlap = Counting::new(true);
    let err = check_unique_particle_attribution(&automaton, &overlap).unwrap_err();
    assert_eq!(overlap.calls.get(), 1);
    let UpaError::Ambiguous { first, second, .. } = err;
    assert_eq!(first, Particle::from(a));
    assert_eq!(second, Particle::from(b));
}
