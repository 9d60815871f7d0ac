//! Refactoring templates to use other templates.
//!
//! If the body of template `A` unifies into the body of template `B`, the
//! matched instances of `B` can be replaced by a single instance of `A`
//! without changing what `B` expands to.

use ottr_core::{Instance, Parameter, ParameterList, Substitution, Term, unify_bodies};
use ottr_store::TemplateStore;

use crate::error::RefactorError;

/// Rewrite `to_change` to instantiate `to_use` where its body contains
/// `to_use`'s body.
///
/// Uses the first unifier of the two bodies that binds every parameter of
/// `to_use`, and returns it.
///
/// # Errors
/// - [`RefactorError::SameTemplate`] if both IRIs are equal.
/// - [`RefactorError::Store`] if either template has no definition.
/// - [`RefactorError::NoUnifier`] if the bodies do not unify.
/// - [`RefactorError::UnboundParameter`] if no unifier binds every
///   parameter of `to_use`.
/// - [`RefactorError::OptionalMismatch`] if a `none` given to `to_change`
///   would reach a parameter of `to_use` that drops the call or substitutes
///   a default.
/// - [`RefactorError::NonBlankMismatch`] if a non-blank parameter of
///   `to_use` would receive a term that may be blank.
/// - [`RefactorError::SharedBlankNode`] if a matched blank node also occurs
///   in the instances that would remain.
pub fn refactor(
    store: &mut TemplateStore,
    to_use: &str,
    to_change: &str,
) -> Result<Substitution, RefactorError> {
    if to_use == to_change {
        return Err(RefactorError::SameTemplate {
            iri: to_use.to_string(),
        });
    }
    let template = store.get_template(to_use)?;
    let target = store.get_template(to_change)?;

    let unifiers = unify_bodies(template.body(), target.body());
    if unifiers.is_empty() {
        return Err(RefactorError::NoUnifier {
            to_use: to_use.to_string(),
            to_change: to_change.to_string(),
        });
    }

    let mut first_error = None;
    for unifier in unifiers {
        let unbound = template
            .parameters()
            .iter()
            .find(|p| !unifier.contains(&p.term()));
        if let Some(param) = unbound {
            first_error.get_or_insert_with(|| RefactorError::UnboundParameter {
                to_use: to_use.to_string(),
                to_change: to_change.to_string(),
                parameter: param.label().to_string(),
            });
            continue;
        }

        if let Some(err) = flag_conflict(&unifier, template.parameters(), target.parameters())
            .map(|conflict| conflict.into_error(to_use, to_change))
        {
            first_error.get_or_insert(err);
            continue;
        }

        let matched: Vec<Instance> = template
            .body()
            .iter()
            .map(|instance| unifier.apply_instance(instance))
            .collect();
        let remaining: Vec<&Instance> = target
            .body()
            .iter()
            .filter(|instance| !matched.contains(instance))
            .collect();

        if let Some(blank) = shared_blank(&unifier, &remaining) {
            first_error.get_or_insert_with(|| RefactorError::SharedBlankNode {
                to_change: to_change.to_string(),
                blank: blank.to_string(),
            });
            continue;
        }

        let call = Instance::from_terms(
            to_use,
            template.parameters().iter().map(|p| unifier.apply(&p.term())),
        );
        tracing::debug!(
            to_use = %to_use,
            to_change = %to_change,
            replaced = matched.len(),
            "refactored template"
        );
        store.rewrite_body(to_change, &matched, vec![call]);
        return Ok(unifier);
    }

    Err(first_error.unwrap_or_else(|| RefactorError::NoUnifier {
        to_use: to_use.to_string(),
        to_change: to_change.to_string(),
    }))
}

enum FlagConflict {
    Optional { parameter: String, argument: String },
    NonBlank { parameter: String, argument: String },
}

impl FlagConflict {
    fn into_error(self, to_use: &str, to_change: &str) -> RefactorError {
        let (to_use, to_change) = (to_use.to_string(), to_change.to_string());
        match self {
            FlagConflict::Optional {
                parameter,
                argument,
            } => RefactorError::OptionalMismatch {
                to_use,
                to_change,
                parameter,
                argument,
            },
            FlagConflict::NonBlank {
                parameter,
                argument,
            } => RefactorError::NonBlankMismatch {
                to_use,
                to_change,
                parameter,
                argument,
            },
        }
    }
}

/// A parameter of `to_use` whose flags do not admit what the unifier binds
/// it to in `to_change`.
///
/// `none` reaches the body of `to_change` only through an optional
/// parameter without a default; it must then reach `to_use` the same way.
fn flag_conflict(
    unifier: &Substitution,
    to_use: &ParameterList,
    to_change: &ParameterList,
) -> Option<FlagConflict> {
    to_use.iter().find_map(|param| {
        let bound = unifier.apply(&param.term());
        let source = bound
            .as_variable()
            .and_then(|var| to_change.find(var.label()));

        if let Some(source) = source.filter(|p| passes_none(p)) {
            if !passes_none(param) {
                return Some(FlagConflict::Optional {
                    parameter: param.label().to_string(),
                    argument: source.label().to_string(),
                });
            }
        }
        let may_be_blank = bound.is_blank() || source.is_some_and(|p| !p.is_non_blank());
        if param.is_non_blank() && may_be_blank {
            return Some(FlagConflict::NonBlank {
                parameter: param.label().to_string(),
                argument: bound.to_string(),
            });
        }
        None
    })
}

fn passes_none(param: &Parameter) -> bool {
    param.is_optional() && !param.has_default()
}

/// A blank node the unifier maps onto that also occurs in `remaining`.
fn shared_blank<'u>(unifier: &'u Substitution, remaining: &[&Instance]) -> Option<&'u Term> {
    unifier
        .iter()
        .filter(|(from, _)| from.is_blank())
        .map(|(_, to)| to)
        .find(|blank| {
            remaining.iter().any(|instance| {
                instance
                    .arguments()
                    .terms()
                    .any(|term| term.occurrences().iter().any(|(t, _)| t == blank))
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Expander;
    use ottr_core::{Parameter, ParameterList, Template, Type};

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn params(labels: &[&str]) -> ParameterList {
        labels
            .iter()
            .map(|l| Parameter::new(*l, Type::top()))
            .collect()
    }

    fn store() -> TemplateStore {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Named",
            params(&["x", "n"]),
            [Instance::triple(Term::var("x"), iri("ex:name"), Term::var("n"))],
        ));
        store.add_template(Template::new(
            "ex:Person",
            params(&["p", "name"]),
            [
                Instance::triple(Term::var("p"), iri("rdf:type"), iri("ex:Person")),
                Instance::triple(Term::var("p"), iri("ex:name"), Term::var("name")),
            ],
        ));
        store
    }

    #[test]
    fn replaces_matched_instances() {
        let mut store = store();
        let unifier = refactor(&mut store, "ex:Named", "ex:Person").unwrap();
        assert_eq!(unifier.get(&Term::var("x")), Some(&Term::var("p")));

        let body = store.body("ex:Person").unwrap();
        assert_eq!(body.len(), 2);
        assert!(body.contains(&Instance::from_terms(
            "ex:Named",
            [Term::var("p"), Term::var("name")]
        )));
        assert!(store.depends_on("ex:Named").contains("ex:Person"));
    }

    #[test]
    fn expansion_unchanged() {
        let mut store = store();
        let call = Instance::from_terms("ex:Person", [iri("ex:ann"), iri("ex:Ann")]);
        let before = Expander::new(&store).expand_instances([call.clone()]).instances;

        refactor(&mut store, "ex:Named", "ex:Person").unwrap();
        let after = Expander::new(&store).expand_instances([call]).instances;

        assert_eq!(before.len(), after.len());
        assert!(before.iter().all(|i| after.contains(i)));
    }

    #[test]
    fn same_template_rejected() {
        let mut store = store();
        match refactor(&mut store, "ex:Named", "ex:Named").unwrap_err() {
            RefactorError::SameTemplate { iri } => assert_eq!(iri, "ex:Named"),
            e => panic!("Expected SameTemplate error, got {:?}", e),
        }
    }

    #[test]
    fn non_unifying_bodies_rejected() {
        let mut store = store();
        let result = refactor(&mut store, "ex:Person", "ex:Named");
        assert!(matches!(result, Err(RefactorError::NoUnifier { .. })));
        assert_eq!(store.body("ex:Named").unwrap().len(), 1);
    }

    #[test]
    fn unbound_parameter_rejected() {
        let mut store = store();
        store.add_template(Template::new(
            "ex:Extra",
            params(&["x", "n", "unused"]),
            [Instance::triple(Term::var("x"), iri("ex:name"), Term::var("n"))],
        ));
        match refactor(&mut store, "ex:Extra", "ex:Person").unwrap_err() {
            RefactorError::UnboundParameter { parameter, .. } => assert_eq!(parameter, "unused"),
            e => panic!("Expected UnboundParameter error, got {:?}", e),
        }
    }

    #[test]
    fn missing_template_rejected() {
        let mut store = store();
        assert!(matches!(
            refactor(&mut store, "ex:Nope", "ex:Person"),
            Err(RefactorError::Store(_))
        ));
    }

    #[test]
    fn shared_blank_node_rejected() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:HasAnon",
            params(&["x"]),
            [Instance::triple(Term::var("x"), iri("ex:p"), Term::blank("a"))],
        ));
        store.add_template(Template::new(
            "ex:Chain",
            params(&["x"]),
            [
                Instance::triple(Term::var("x"), iri("ex:p"), Term::blank("b")),
                Instance::triple(Term::blank("b"), iri("ex:q"), iri("ex:o")),
            ],
        ));
        assert!(matches!(
            refactor(&mut store, "ex:HasAnon", "ex:Chain"),
            Err(RefactorError::SharedBlankNode { .. })
        ));
    }

    // ==========================================================================
    // Parameter flags
    // ==========================================================================

    fn thing_body() -> [Instance; 2] {
        [
            Instance::triple(Term::var("x"), iri("rdf:type"), iri("ex:Thing")),
            Instance::triple(Term::var("x"), iri("ex:name"), Term::var("n")),
        ]
    }

    /// `to_use(x, n)` and `to_change(x, n)` with the same body and the given
    /// parameters.
    fn flagged_store(to_use: [Parameter; 2], to_change: [Parameter; 2]) -> TemplateStore {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Use",
            ParameterList::new(to_use.to_vec()),
            thing_body(),
        ));
        store.add_template(Template::new(
            "ex:Change",
            ParameterList::new(to_change.to_vec()),
            thing_body(),
        ));
        store
    }

    fn expand(store: &TemplateStore, args: [Term; 2]) -> Vec<Instance> {
        Expander::new(store)
            .expand_instances([Instance::from_terms("ex:Change", args)])
            .instances
    }

    fn top(label: &str) -> Parameter {
        Parameter::new(label, Type::top())
    }

    #[test]
    fn optional_into_required_rejected() {
        let mut store = flagged_store([top("x"), top("n")], [top("x"), top("n").optional()]);
        let before = expand(&store, [iri("ex:a"), Term::None]);
        assert_eq!(before.len(), 1);

        match refactor(&mut store, "ex:Use", "ex:Change").unwrap_err() {
            RefactorError::OptionalMismatch {
                parameter,
                argument,
                ..
            } => {
                assert_eq!(parameter, "n");
                assert_eq!(argument, "n");
            }
            e => panic!("Expected OptionalMismatch error, got {:?}", e),
        }
        assert_eq!(store.body("ex:Change").unwrap().len(), 2);
        assert_eq!(expand(&store, [iri("ex:a"), Term::None]), before);
    }

    #[test]
    fn optional_into_defaulted_rejected() {
        let mut store = flagged_store(
            [top("x"), top("n").optional().with_default(iri("ex:Anon"))],
            [top("x"), top("n").optional()],
        );
        assert!(matches!(
            refactor(&mut store, "ex:Use", "ex:Change"),
            Err(RefactorError::OptionalMismatch { .. })
        ));
    }

    #[test]
    fn optional_into_optional_keeps_expansion() {
        let mut store = flagged_store(
            [top("x"), top("n").optional()],
            [top("x"), top("n").optional()],
        );
        let with_none = expand(&store, [iri("ex:a"), Term::None]);
        let with_name = expand(&store, [iri("ex:a"), Term::plain_literal("A")]);

        refactor(&mut store, "ex:Use", "ex:Change").unwrap();
        assert!(store.depends_on("ex:Use").contains("ex:Change"));

        assert_eq!(expand(&store, [iri("ex:a"), Term::None]), with_none);
        assert_eq!(with_none.len(), 1);
        let after = expand(&store, [iri("ex:a"), Term::plain_literal("A")]);
        assert_eq!(after.len(), with_name.len());
        assert!(with_name.iter().all(|i| after.contains(i)));
    }

    #[test]
    fn required_into_optional_allowed() {
        let mut store = flagged_store([top("x"), top("n").optional()], [top("x"), top("n")]);
        assert!(refactor(&mut store, "ex:Use", "ex:Change").is_ok());
    }

    #[test]
    fn blank_capable_into_non_blank_rejected() {
        let mut store = flagged_store([top("x").non_blank(), top("n")], [top("x"), top("n")]);
        let before = expand(&store, [Term::blank("b"), iri("ex:N")]);
        assert_eq!(before.len(), 2);

        match refactor(&mut store, "ex:Use", "ex:Change").unwrap_err() {
            RefactorError::NonBlankMismatch { parameter, .. } => assert_eq!(parameter, "x"),
            e => panic!("Expected NonBlankMismatch error, got {:?}", e),
        }
        assert_eq!(store.body("ex:Change").unwrap().len(), 2);
    }

    #[test]
    fn non_blank_into_non_blank_allowed() {
        let mut store = flagged_store(
            [top("x").non_blank(), top("n")],
            [top("x").non_blank(), top("n")],
        );
        let before = expand(&store, [iri("ex:a"), iri("ex:N")]);
        refactor(&mut store, "ex:Use", "ex:Change").unwrap();
        let after = expand(&store, [iri("ex:a"), iri("ex:N")]);
        assert_eq!(before.len(), after.len());
        assert!(before.iter().all(|i| after.contains(i)));
    }
}
