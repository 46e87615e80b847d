use std::sync::Arc;
use std::thread;

use cmdfa_core::{
    Colors, ElementDecl, NamespaceConstraint, NoSubstitution, Particle, QName, SubstitutionTable,
    Wildcard,
};

use crate::{CompileError, Compiler, ContentModel, Error, Node, StateId, StateRef, UpaError};

fn decl(local: &str) -> Arc<ElementDecl> {
    ElementDecl::shared(QName::local(local))
}

fn el(decl: &Arc<ElementDecl>) -> Node {
    Node::element(decl.clone())
}

fn feed<U>(model: &ContentModel<U>, inputs: &[&str]) -> bool {
    let mut cursor = model.start_content_model();
    for input in inputs {
        model.one_transition(&QName::local(*input), &mut cursor, &NoSubstitution);
    }
    model.end_content_model(&cursor)
}

fn a_opt_b_star_c() -> ContentModel<&'static str> {
    let (a, b, c) = (decl("a"), decl("b"), decl("c"));
    let tree = Node::sequence_of([
        el(&a),
        Node::zero_or_one(el(&b)),
        Node::zero_or_more(el(&c)),
    ])
    .unwrap();
    ContentModel::compile(&tree, "T").unwrap()
}

#[test]
fn sequence_counts_transitions() {
    let model = a_opt_b_star_c();
    let mut cursor = model.start_content_model();
    assert_eq!(model.one_transition_counter(&cursor), 0);

    for name in ["a", "c", "c"] {
        model.one_transition(&QName::local(name), &mut cursor, &NoSubstitution);
    }
    let StateRef::Valid(state) = cursor.current() else {
        panic!("session failed: {cursor:?}");
    };
    assert!(model.is_final_state(state));
    assert!(model.end_content_model(&cursor));
    assert_eq!(model.one_transition_counter(&cursor), 3);
}

#[test]
fn one_or_more_is_not_nullable() {
    let (a, b) = (decl("a"), decl("b"));
    let model = ContentModel::compile(&Node::one_or_more(Node::choice(el(&a), el(&b))), ()).unwrap();
    assert!(feed(&model, &["a", "b", "a"]));
    assert!(!feed(&model, &[]));
    assert!(!model.is_final_state(StateId::START));
}

#[test]
fn star_is_nullable() {
    let model = ContentModel::compile(&Node::zero_or_more(el(&decl("a"))), ()).unwrap();
    assert!(feed(&model, &[]));
    assert!(model.is_final_state(StateId::START));
}

#[test]
fn negated_wildcard_beside_foreign_element_violates_upa() {
    let x = ElementDecl::shared(QName::new(Some("urn:z"), "x"));
    let not_y = Wildcard::shared(NamespaceConstraint::Not(vec![Some("urn:y".to_owned())]));
    let tree = Node::choice(el(&x), Node::wildcard(not_y.clone()));
    let model = ContentModel::compile(&tree, ()).unwrap();

    let err = model
        .check_unique_particle_attribution(&NoSubstitution)
        .unwrap_err();
    let Error::Upa(UpaError::Ambiguous { first, second, .. }) = &err else {
        panic!("expected a UPA error, got {err:?}");
    };
    assert_eq!(*first, Particle::from(x));
    assert_eq!(*second, Particle::from(not_y));
    assert!(model.automaton().has_loose_wildcard());
}

#[test]
fn error_cursor_keeps_saved_state() {
    let model = a_opt_b_star_c();
    let mut cursor = model.start_content_model();
    model.one_transition(&QName::local("b"), &mut cursor, &NoSubstitution);
    assert_eq!(cursor.current(), StateRef::FirstError);
    let saved = cursor.saved();

    model.one_transition(&QName::local("a"), &mut cursor, &NoSubstitution);
    assert_eq!(cursor.current(), StateRef::SubsequentError);
    assert_eq!(cursor.saved(), saved);
    assert_eq!(saved, Some(StateId::START));
}

#[test]
fn what_can_go_here_in_alphabet_order() {
    let model = a_opt_b_star_c();
    let mut cursor = model.start_content_model();
    model.one_transition(&QName::local("a"), &mut cursor, &NoSubstitution);
    let names: Vec<String> = model
        .what_can_go_here(&cursor)
        .iter()
        .map(|p| p.to_string())
        .collect();
    assert_eq!(names, ["b", "c"]);
}

#[test]
fn user_data_and_dump() {
    let model = a_opt_b_star_c();
    assert_eq!(model.user_data(), &"T");
    insta::assert_snapshot!(model.dump(Colors::OFF), @r"
    [symbols]
      #0 a
      #1 b
      #2 c

    [states]
      0   #0→1
      1 ◉ #1→2 #2→2
      2 ◉ #2→2
    ");
}

#[test]
fn upa_with_substitution_groups() {
    let head = decl("shape");
    let circle = decl("circle");
    let mut groups = SubstitutionTable::new();
    groups.add(&head, circle.clone());

    let model = ContentModel::compile(&Node::choice(el(&head), el(&circle)), ()).unwrap();
    assert!(model.check_unique_particle_attribution(&groups).is_err());
    assert!(matches!(
        model.check_unique_particle_attribution(&NoSubstitution),
        Ok(false)
    ));
}

#[test]
fn state_limit_surfaces_as_compile_error() {
    let compiler = Compiler::builder().max_states(1).build();
    let tree = Node::sequence(el(&decl("a")), el(&decl("b")));
    let err = ContentModel::compile_with(&compiler, &tree, ()).err().unwrap();
    assert!(matches!(
        err,
        Error::Compile(CompileError::StateLimitExceeded { limit: 1 })
    ));
    assert_eq!(err.to_string(), "content model needs more than 1 DFA states");
}

#[test]
fn shared_across_threads() {
    let model = a_opt_b_star_c();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let model = model.clone();
            thread::spawn(move || {
                let inputs: Vec<&str> = std::iter::once("a")
                    .chain(std::iter::repeat_n("c", i))
                    .collect();
                feed(&model, &inputs)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn large_occurrence_bounds_compile() {
    let model = ContentModel::from_json(
        r#"{ "kind": "element", "name": "a", "min_occurs": 0, "max_occurs": 5000 }"#,
    )
    .unwrap();
    assert_eq!(model.automaton().state_count(), 5001);
    assert!(matches!(
        model.check_unique_particle_attribution(&NoSubstitution),
        Ok(false)
    ));

    let at_limit = vec!["a"; 5000];
    assert!(feed(&model, &at_limit));
    assert!(feed(&model, &[]));

    let past_limit = vec!["a"; 5001];
    assert!(!feed(&model, &past_limit));
}
