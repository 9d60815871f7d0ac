use ottr::prelude::*;
use ottr::query::library;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn iri(s: &str) -> Term {
    Term::iri(s)
}

fn params(labels: &[&str]) -> ParameterList {
    labels
        .iter()
        .map(|l| Parameter::new(*l, Type::top()))
        .collect()
}

fn triple(s: Term, p: &str, o: Term) -> Instance {
    Instance::triple(s, iri(p), o)
}

/// A small library: `Pair(x, y)`, `Named(x, n)` and `Person(p, n)`, where
/// `Person` repeats the body of `Named` inline.
fn library_store() -> TemplateStore {
    let mut store = TemplateStore::with_base_templates();
    store.add_template(Template::new(
        "ex:Pair",
        params(&["x", "y"]),
        [triple(Term::var("x"), "ex:rel", Term::var("y"))],
    ));
    store.add_template(Template::new(
        "ex:Named",
        params(&["x", "n"]),
        [triple(Term::var("x"), "ex:name", Term::var("n"))],
    ));
    store.add_template(Template::new(
        "ex:Person",
        params(&["p", "n"]),
        [
            triple(Term::var("p"), "rdf:type", iri("ex:Person")),
            triple(Term::var("p"), "ex:name", Term::var("n")),
        ],
    ));
    store
}

fn sorted(instances: &[Instance]) -> Vec<String> {
    let mut shown: Vec<String> = instances.iter().map(ToString::to_string).collect();
    shown.sort();
    shown
}

fn marked(expander: ListExpander, left: Vec<Term>, right: Vec<Term>) -> Instance {
    Instance::new(
        "ex:Pair",
        ArgumentList::new(vec![
            Argument::expanded(Term::list(left)),
            Argument::expanded(Term::list(right)),
        ])
        .with_expander(expander),
    )
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_base_instance_passes_through() {
    let store = TemplateStore::with_base_templates();
    let instance = triple(iri("ex:a"), "ex:p", iri("ex:b"));
    let output = Expander::new(&store).expand_instances([instance.clone()]);
    assert_eq!(output.instances, vec![instance]);
    assert!(output.messages.is_empty());
}

#[test]
fn test_expansion_ends_in_base_templates() {
    let mut store = library_store();
    store.add_template(Template::new(
        "ex:Couple",
        params(&["a", "b"]),
        [
            Instance::from_terms("ex:Person", [Term::var("a"), Term::plain_literal("A")]),
            Instance::from_terms("ex:Person", [Term::var("b"), Term::plain_literal("B")]),
            Instance::from_terms("ex:Pair", [Term::var("a"), Term::var("b")]),
        ],
    ));

    let output = Expander::new(&store)
        .expand_instances([Instance::from_terms("ex:Couple", [iri("ex:ann"), iri("ex:bob")])]);
    assert!(output.messages.is_empty());
    assert_eq!(output.instances.len(), 5);
    assert!(output.instances.iter().all(Instance::is_triple));
    assert!(output
        .instances
        .iter()
        .all(|i| i.arguments().terms().all(Term::is_ground)));
}

#[test]
fn test_wrong_arity_yields_error_and_nothing() {
    let store = library_store();
    let output =
        Expander::new(&store).expand_instances([Instance::from_terms("ex:Pair", [iri("ex:a")])]);
    assert!(output.instances.is_empty());
    assert_eq!(output.messages.error_count(), 1);
}

#[test]
fn test_none_at_required_position_is_silently_dropped() {
    let store = library_store();
    let output = Expander::new(&store)
        .expand_instances([Instance::from_terms("ex:Pair", [iri("ex:a"), Term::None])]);
    assert!(output.instances.is_empty());
    assert!(output.messages.is_empty());
}

// ============================================================================
// List expansion
// ============================================================================

#[test]
fn test_cross_produces_every_combination_in_order() {
    let store = library_store();
    let instance = marked(
        ListExpander::Cross,
        vec![iri("ex:a"), iri("ex:b")],
        vec![iri("ex:1"), iri("ex:2"), iri("ex:3")],
    );
    let output = Expander::new(&store).expand_instances([instance]);
    assert!(output.messages.is_empty());

    let expected: Vec<Instance> = ["ex:a", "ex:b"]
        .iter()
        .flat_map(|l| {
            ["ex:1", "ex:2", "ex:3"]
                .iter()
                .map(move |r| triple(iri(l), "ex:rel", iri(r)))
        })
        .collect();
    assert_eq!(output.instances, expected);
}

#[test]
fn test_zip_min_stops_at_shortest_list() {
    let store = library_store();
    let instance = marked(
        ListExpander::ZipMin,
        vec![iri("ex:a"), iri("ex:b")],
        vec![iri("ex:1"), iri("ex:2"), iri("ex:3")],
    );
    let output = Expander::new(&store).expand_instances([instance]);
    assert!(output.messages.is_empty());
    assert_eq!(
        output.instances,
        vec![
            triple(iri("ex:a"), "ex:rel", iri("ex:1")),
            triple(iri("ex:b"), "ex:rel", iri("ex:2")),
        ]
    );
}

#[test]
fn test_zip_max_reports_missing_elements() {
    let store = library_store();
    let instance = marked(
        ListExpander::ZipMax,
        vec![iri("ex:a"), iri("ex:b")],
        vec![iri("ex:1"), iri("ex:2"), iri("ex:3"), iri("ex:4")],
    );
    let output = Expander::new(&store).expand_instances([instance]);
    assert_eq!(output.instances.len(), 2);
    assert_eq!(output.messages.error_count(), 2);
}

#[test]
fn test_marked_none_counts_as_single_element() {
    let store = library_store();
    let instance = Instance::new(
        "ex:Pair",
        ArgumentList::new(vec![
            Argument::expanded(Term::None),
            Argument::expanded(Term::list([iri("ex:1"), iri("ex:2")])),
        ])
        .with_expander(ListExpander::Cross),
    );
    // Both steps carry none at a required position and are dropped.
    let output = Expander::new(&store).expand_instances([instance]);
    assert!(output.instances.is_empty());
    assert!(output.messages.is_empty());
}

// ============================================================================
// Store
// ============================================================================

#[test]
fn test_conflicting_redefinition_is_rejected_with_warning() {
    let mut store = library_store();
    store.add_signature(Signature::new("ex:Sig", params(&["x"])));

    assert!(!store.add_template(Template::new(
        "ex:Sig",
        params(&["x", "y"]),
        [triple(Term::var("x"), "ex:p", Term::var("y"))],
    )));
    assert!(!store.add_template(Template::new(
        "ex:Pair",
        params(&["x", "y"]),
        [triple(Term::var("y"), "ex:rel", Term::var("x"))],
    )));

    assert_eq!(store.messages().warning_count(), 2);
    assert!(!store.contains_definition_of("ex:Sig"));
    assert_eq!(
        store.body("ex:Pair").unwrap(),
        vec![triple(Term::var("x"), "ex:rel", Term::var("y"))]
    );
}

#[test]
fn test_fetch_then_expand() {
    init_tracing();
    let mut store = TemplateStore::with_base_templates();
    store.add_template(Template::new(
        "ex:Top",
        params(&["x"]),
        [Instance::from_terms("ex:Leaf", [Term::var("x")])],
    ));

    let mut reader = |store: &mut TemplateStore, requested: &str| -> Result<(), ReaderError> {
        match requested {
            "ex:Leaf" => {
                store.add_template(Template::new(
                    "ex:Leaf",
                    params(&["x"]),
                    [triple(Term::var("x"), "ex:p", iri("ex:o"))],
                ));
                Ok(())
            }
            other => Err(ReaderError::NotFound {
                iri: other.to_string(),
            }),
        }
    };

    let config = ExpanderConfig::new().with_fetch_missing(true);
    let (expander, messages) = Expander::fetching(&mut store, &mut reader, config);
    assert!(!messages.has_errors());

    let output = expander.expand_instances([Instance::from_terms("ex:Top", [iri("ex:a")])]);
    assert_eq!(
        output.instances,
        vec![triple(iri("ex:a"), "ex:p", iri("ex:o"))]
    );
}

// ============================================================================
// Checks
// ============================================================================

#[test]
fn test_well_formed_library_passes_checks() {
    let messages = check_templates(&library_store());
    assert!(messages.is_empty(), "unexpected messages: {:?}", messages);
}

#[test]
fn test_self_dependency_is_flagged_and_left_unexpanded() {
    let mut store = library_store();
    store.add_template(Template::new(
        "ex:Loop",
        params(&["x"]),
        [Instance::from_terms("ex:Loop", [Term::var("x")])],
    ));

    let messages = library::cyclic_dependency().check(&store);
    assert_eq!(messages.error_count(), 1);
    assert!(messages.iter().any(|m| m.text.contains("ex:Loop")));
    assert!(check_templates(&store).has_errors());

    let result = Expander::new(&store).expand_all();
    assert_eq!(result.messages.error_count(), 1);
    assert_eq!(
        result.store.body("ex:Loop").unwrap(),
        vec![Instance::from_terms("ex:Loop", [Term::var("x")])]
    );
    assert_eq!(result.store.body("ex:Person").unwrap().len(), 2);
}

// ============================================================================
// Refactoring
// ============================================================================

#[test]
fn test_refactoring_preserves_expansion() {
    let mut store = library_store();
    let call = Instance::from_terms("ex:Person", [iri("ex:ann"), Term::plain_literal("Ann")]);
    let before = Expander::new(&store).expand_instances([call.clone()]).instances;

    let candidates = find_refactorings(&store);
    assert!(candidates.contains(&("ex:Named".to_string(), "ex:Person".to_string())));

    refactor(&mut store, "ex:Named", "ex:Person").unwrap();
    let body = store.body("ex:Person").unwrap();
    assert!(body.iter().any(|i| i.iri() == "ex:Named"));

    let after = Expander::new(&store).expand_instances([call]).instances;
    assert_eq!(sorted(&before), sorted(&after));
    assert!(check_templates(&store).is_empty());
}

#[test]
fn test_refactoring_errors_convert_into_ottr_error() {
    fn run(store: &mut TemplateStore) -> OttrResult<Substitution> {
        Ok(refactor(store, "ex:Pair", "ex:Pair")?)
    }

    let mut store = library_store();
    match run(&mut store).unwrap_err() {
        OttrError::Refactor(RefactorError::SameTemplate { iri }) => assert_eq!(iri, "ex:Pair"),
        e => panic!("Expected SameTemplate error, got {:?}", e),
    }
}

#[test]
fn test_refactoring_refused_when_none_would_drop_more() {
    let body = || {
        [
            triple(Term::var("x"), "rdf:type", iri("ex:Thing")),
            triple(Term::var("x"), "ex:name", Term::var("n")),
        ]
    };
    let mut store = TemplateStore::with_base_templates();
    store.add_template(Template::new("ex:A", params(&["x", "n"]), body()));
    store.add_template(Template::new(
        "ex:B",
        ParameterList::new(vec![
            Parameter::new("x", Type::top()),
            Parameter::new("n", Type::top()).optional(),
        ]),
        body(),
    ));

    let call = Instance::from_terms("ex:B", [iri("ex:a"), Term::None]);
    let before = Expander::new(&store).expand_instances([call.clone()]).instances;
    assert_eq!(
        before,
        vec![triple(iri("ex:a"), "rdf:type", iri("ex:Thing"))]
    );

    assert!(!find_refactorings(&store).is_empty());
    match refactor(&mut store, "ex:A", "ex:B").unwrap_err() {
        RefactorError::OptionalMismatch { to_use, .. } => assert_eq!(to_use, "ex:A"),
        e => panic!("Expected OptionalMismatch error, got {:?}", e),
    }

    let after = Expander::new(&store).expand_instances([call]).instances;
    assert_eq!(sorted(&before), sorted(&after));
}
