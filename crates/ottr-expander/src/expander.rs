//! Template expansion.
//!
//! Expansion rewrites instances of defined templates into the instances of
//! their bodies, repeatedly, until only base-template instances remain.
//!
//! # Edge States
//!
//! Every instance being expanded is an *edge* from its caller (a template
//! body, or nothing for top-level instances) to its callee. Each edge is
//! resolved in this order:
//!
//! 1. **Blocked**: the callee has no definition.
//! 2. **List expansion**: a resolvable list expander is expanded first and
//!    every resulting edge re-enters the state machine.
//! 3. **Arity**: argument and parameter counts must match.
//! 4. **Discard**: a `none` argument at a parameter that is neither
//!    optional nor defaulted silently drops the instance.
//! 5. **Argument checks**: types and non-blank flags, on every edge when
//!    enabled in the config.
//! 6. **Base**: the instance is output.
//! 7. **Expand**: the callee's body is substituted and its instances
//!    become new edges.
//!
//! Top-level expansion ([`Expander::expand_instance`]) reports failures as
//! `Err` items of a lazy stream. Store expansion ([`Expander::expand_all`])
//! instead leaves failing edges unexpanded and reports them as messages.

use std::collections::VecDeque;

use ottr_core::{
    ArgumentList, ExpansionStep, Instance, Message, Messages, ParameterList, Substitution, Template,
};
use ottr_store::{NodeKind, TemplateNode, TemplateReader, TemplateStore};
use rustc_hash::FxHashSet;

use crate::config::ExpanderConfig;
use crate::error::ExpansionError;

/// Expands instances against a [`TemplateStore`].
#[derive(Debug, Clone, Copy)]
pub struct Expander<'s> {
    store: &'s TemplateStore,
    config: ExpanderConfig,
}

/// Result of expanding many instances.
#[derive(Debug, Clone, Default)]
pub struct ExpansionOutput {
    /// Base-template instances, in expansion order.
    pub instances: Vec<Instance>,
    /// One ERROR per failed edge.
    pub messages: Messages,
}

/// Result of expanding a whole store.
#[derive(Debug)]
pub struct StoreExpansion {
    pub store: TemplateStore,
    pub messages: Messages,
}

impl<'s> Expander<'s> {
    pub fn new(store: &'s TemplateStore) -> Self {
        Self::with_config(store, ExpanderConfig::default())
    }

    pub fn with_config(store: &'s TemplateStore, config: ExpanderConfig) -> Self {
        Self { store, config }
    }

    /// Build an expander, first fetching missing dependencies through
    /// `reader` if the configuration asks for it.
    pub fn fetching(
        store: &'s mut TemplateStore,
        reader: &mut dyn TemplateReader,
        config: ExpanderConfig,
    ) -> (Self, Messages) {
        let messages = if config.fetch_missing() {
            store.fetch_missing_dependencies(reader)
        } else {
            Messages::new()
        };
        (Self::with_config(store, config), messages)
    }

    pub fn store(&self) -> &'s TemplateStore {
        self.store
    }

    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    // ==========================================================================
    // Top-level expansion
    // ==========================================================================

    /// Lazily expand one instance into base-template instances.
    pub fn expand_instance(&self, instance: Instance) -> Expansion<'s> {
        Expansion {
            store: self.store,
            config: self.config,
            worklist: VecDeque::from([Work::Edge(instance)]),
            steps: 0,
        }
    }

    /// Expand every instance, collecting output and errors.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn expand_instances(
        &self,
        instances: impl IntoIterator<Item = Instance>,
    ) -> ExpansionOutput {
        let mut output = ExpansionOutput::default();
        for instance in instances {
            for result in self.expand_instance(instance) {
                match result {
                    Ok(instance) => output.instances.push(instance),
                    Err(err) => output.messages.push(Message::from(&err)),
                }
            }
        }
        tracing::debug!(
            instances = output.instances.len(),
            errors = output.messages.error_count(),
            "expanded instances"
        );
        output
    }

    // ==========================================================================
    // Store expansion
    // ==========================================================================

    /// Expand every template body as far as possible into a new store.
    pub fn expand_all(&self) -> StoreExpansion {
        self.expand_only(|_| true)
    }

    /// Expand only instances of the templates in `iris`.
    pub fn expand_vocabulary(&self, iris: &[&str]) -> StoreExpansion {
        let vocabulary: FxHashSet<&str> = iris.iter().copied().collect();
        self.expand_only(|instance| vocabulary.contains(instance.iri()))
    }

    /// Expand the body instances accepted by `accept` into a new store.
    ///
    /// Templates are processed callees first, so each body is expanded one
    /// level against bodies that are already expanded. Templates on or
    /// downstream of a dependency cycle are copied unexpanded.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn expand_only(&self, accept: impl Fn(&Instance) -> bool) -> StoreExpansion {
        let order = self.store.topological_order();
        let mut expanded = TemplateStore::with_config(self.store.config().clone());
        let mut messages = Messages::new();

        for iri in &order.sorted {
            let Some(node) = self.store.node(iri) else {
                continue;
            };
            if node.is_definition() {
                let Some(params) = node.parameters() else {
                    continue;
                };
                let body = self.store.body(iri).unwrap_or_default();
                let body = BodyExpansion {
                    caller: iri,
                    parameters: params,
                    target: &expanded,
                    accept: &accept,
                    max_steps: self.config.max_iterations(),
                }
                .run(body, &mut messages);
                expanded.add_template(Template::new(iri.as_str(), params.clone(), body));
            } else {
                copy_declaration(node, &mut expanded);
            }
        }

        if !order.unsorted.is_empty() {
            let cyclic = self.store.cyclic_templates();
            for iri in &order.unsorted {
                if let Some(node) = self.store.node(iri) {
                    if cyclic.contains(iri) {
                        messages.push(Message::error(format!(
                            "Template {} is part of a dependency cycle and is not expanded",
                            iri
                        )));
                    } else if node.is_definition() {
                        messages.push(Message::warning(format!(
                            "Template {} depends on a dependency cycle and is not expanded",
                            iri
                        )));
                    }
                    if let Ok(template) = self.store.get_template(iri) {
                        expanded.add_template(template);
                    } else {
                        copy_declaration(node, &mut expanded);
                    }
                }
            }
        }

        let mut store_messages = expanded.take_messages();
        store_messages.append(messages);
        tracing::info!(
            templates = expanded.template_count(),
            unexpanded = order.unsorted.len(),
            errors = store_messages.error_count(),
            "expanded template store"
        );
        StoreExpansion {
            store: expanded,
            messages: store_messages,
        }
    }
}

fn copy_declaration(node: &TemplateNode, into: &mut TemplateStore) {
    match (node.kind(), node.signature()) {
        (NodeKind::Base, Some(signature)) => {
            into.add_base(signature);
        }
        (NodeKind::Signature, Some(signature)) => {
            into.add_signature(signature);
        }
        _ => {}
    }
}

/// A `none` argument at a position that neither accepts `none` nor has a
/// default.
fn should_discard(args: &ArgumentList, params: &ParameterList) -> bool {
    args.iter()
        .zip(params.iter())
        .any(|(arg, param)| arg.term.is_none() && !param.accepts_none())
}

fn expand_list_steps(instance: &Instance, steps: Vec<ExpansionStep>) -> Vec<Work> {
    steps
        .into_iter()
        .map(|step| match step {
            ExpansionStep::Expanded(args) => Work::Edge(Instance::new(instance.iri(), args)),
            ExpansionStep::Exhausted { step, positions } => {
                Work::Failed(ExpansionError::ZipMaxExhausted {
                    instance: instance.to_string(),
                    step,
                    positions,
                })
            }
        })
        .collect()
}

// ============================================================================
// Lazy top-level expansion
// ============================================================================

enum Work {
    Edge(Instance),
    Failed(ExpansionError),
}

/// Lazy stream of expansion results for one top-level instance.
///
/// Created by [`Expander::expand_instance`]. Results come out depth-first,
/// in body order.
pub struct Expansion<'s> {
    store: &'s TemplateStore,
    config: ExpanderConfig,
    worklist: VecDeque<Work>,
    steps: usize,
}

impl Expansion<'_> {
    /// Schedule `items` next, keeping their order.
    fn push_next(&mut self, items: Vec<Work>) {
        for item in items.into_iter().rev() {
            self.worklist.push_front(item);
        }
    }

    /// Resolve one edge. `Some` is an item for the caller; `None` means the
    /// edge was replaced or dropped.
    fn step(&mut self, instance: Instance) -> Option<Result<Instance, ExpansionError>> {
        let store = self.store;
        let iri = instance.iri();
        let node = match store.node(iri) {
            Some(node) if node.is_definition() || node.is_base() => node,
            _ => {
                return Some(Err(ExpansionError::MissingDefinition {
                    iri: iri.to_string(),
                }));
            }
        };

        if instance.arguments().has_expander() {
            if !instance.arguments().can_expand_lists() {
                return Some(Err(ExpansionError::UnresolvedListExpander {
                    instance: instance.to_string(),
                }));
            }
            let steps = instance.arguments().expand_lists().unwrap_or_default();
            tracing::debug!(instance = %instance, steps = steps.len(), "expanding lists");
            let work = expand_list_steps(&instance, steps);
            self.push_next(work);
            return None;
        }

        let params = node.parameters()?;
        let args = instance.arguments();
        if args.len() != params.len() {
            return Some(Err(ExpansionError::ArityMismatch {
                iri: iri.to_string(),
                expected: params.len(),
                got: args.len(),
            }));
        }

        if should_discard(args, params) {
            tracing::debug!(instance = %instance, "discarding instance with none argument");
            return None;
        }

        if self.config.check_arguments() {
            if let Err(err) = check_arguments(&instance, params) {
                return Some(Err(err));
            }
        }

        if node.is_base() {
            return Some(Ok(instance));
        }

        let subst = match Substitution::from_arguments(args, params) {
            Ok(subst) => subst,
            Err(err) => return Some(Err(ExpansionError::Substitution(err))),
        };
        let body = store.body(iri).unwrap_or_default();
        let work: Vec<Work> = subst
            .apply_body(&body)
            .into_iter()
            .map(Work::Edge)
            .collect();
        self.push_next(work);
        None
    }
}

impl Iterator for Expansion<'_> {
    type Item = Result<Instance, ExpansionError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(work) = self.worklist.pop_front() {
            let instance = match work {
                Work::Failed(err) => return Some(Err(err)),
                Work::Edge(instance) => instance,
            };

            self.steps += 1;
            if self.steps > self.config.max_iterations() {
                self.worklist.clear();
                tracing::warn!(limit = self.config.max_iterations(), "expansion step limit reached");
                return Some(Err(ExpansionError::IterationLimit {
                    limit: self.config.max_iterations(),
                }));
            }

            if let Some(result) = self.step(instance) {
                return Some(result);
            }
        }
        None
    }
}

/// Type and non-blank checks for an instance about to be expanded or output.
fn check_arguments(instance: &Instance, params: &ParameterList) -> Result<(), ExpansionError> {
    for (position, (arg, param)) in instance.arguments().iter().zip(params.iter()).enumerate() {
        let term = &arg.term;
        if term.is_none() {
            continue;
        }
        if param.is_non_blank() && term.is_blank() {
            return Err(ExpansionError::BlankForNonBlank {
                iri: instance.iri().to_string(),
                position,
                argument: term.to_string(),
            });
        }
        let found = term.ty();
        if !found.is_compatible_with(param.ty()) {
            return Err(ExpansionError::IncompatibleType {
                iri: instance.iri().to_string(),
                position,
                argument: term.to_string(),
                found,
                expected: param.ty().clone(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Body expansion
// ============================================================================

/// Expansion of one template body against an already expanded store.
struct BodyExpansion<'a, A> {
    caller: &'a str,
    parameters: &'a ParameterList,
    target: &'a TemplateStore,
    accept: &'a A,
    max_steps: usize,
}

impl<A> BodyExpansion<'_, A>
where
    A: Fn(&Instance) -> bool,
{
    fn run(&self, body: Vec<Instance>, messages: &mut Messages) -> Vec<Instance> {
        let mut worklist: VecDeque<Instance> = body.into();
        let mut output = Vec::new();
        let mut steps = 0;

        while let Some(instance) = worklist.pop_front() {
            steps += 1;
            if steps > self.max_steps {
                messages.push(Message::error(format!(
                    "Expansion of {} stopped after {} steps",
                    self.caller, self.max_steps
                )));
                output.push(instance);
                output.extend(worklist.drain(..));
                break;
            }
            match self.step(&instance, messages) {
                BodyStep::Keep => output.push(instance),
                BodyStep::Drop => {}
                BodyStep::Replace(next) => {
                    for item in next.into_iter().rev() {
                        worklist.push_front(item);
                    }
                }
            }
        }
        output
    }

    fn step(&self, instance: &Instance, messages: &mut Messages) -> BodyStep {
        if !(self.accept)(instance) {
            return BodyStep::Keep;
        }

        let callee = instance.iri();
        let node = match self.target.node(callee) {
            Some(node) if node.kind() != NodeKind::Undefined => node,
            _ => {
                messages.push_unique(Message::from(&ExpansionError::MissingDefinition {
                    iri: callee.to_string(),
                }));
                return BodyStep::Keep;
            }
        };

        let args = instance.arguments();
        if args.has_expander() {
            if !args.can_expand_lists() {
                return BodyStep::Keep;
            }
            let steps = args.expand_lists().unwrap_or_default();
            let mut next = Vec::with_capacity(steps.len());
            for work in expand_list_steps(instance, steps) {
                match work {
                    Work::Edge(edge) => next.push(edge),
                    Work::Failed(err) => messages.push(Message::from(&err)),
                }
            }
            return BodyStep::Replace(next);
        }

        let Some(params) = node.parameters() else {
            return BodyStep::Keep;
        };
        if args.len() != params.len() {
            messages.push_unique(Message::from(&ExpansionError::ArityMismatch {
                iri: callee.to_string(),
                expected: params.len(),
                got: args.len(),
            }));
            return BodyStep::Keep;
        }

        if should_discard(args, params) {
            return BodyStep::Drop;
        }

        if !node.is_definition() || !self.can_expand(args, params) {
            return BodyStep::Keep;
        }

        match Substitution::from_arguments(args, params) {
            Ok(subst) => {
                let body = self.target.body(callee).unwrap_or_default();
                tracing::debug!(caller = %self.caller, callee = %callee, "expanding body instance");
                BodyStep::Replace(subst.apply_body(&body))
            }
            Err(err) => {
                messages.push(Message::from(&err));
                BodyStep::Keep
            }
        }
    }

    /// A variable optional in the caller must not flow into a position the
    /// callee requires, or a `none` would be lost instead of discarding.
    fn can_expand(&self, args: &ArgumentList, callee: &ParameterList) -> bool {
        args.iter().zip(callee.iter()).all(|(arg, param)| {
            let optional_in_caller = arg
                .term
                .as_variable()
                .and_then(|var| self.parameters.find(var.label()))
                .is_some_and(|p| p.is_optional());
            !optional_in_caller || param.is_optional()
        })
    }
}

enum BodyStep {
    Keep,
    Drop,
    Replace(Vec<Instance>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ottr_core::{Argument, ListExpander, Parameter, Signature, Term, Type, vocab};

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn params(labels: &[&str]) -> ParameterList {
        labels
            .iter()
            .map(|l| Parameter::new(*l, Type::top()))
            .collect()
    }

    /// `ex:Person(?x, ?name)` -> `(?x a ex:Person)`, `(?x ex:name ?name)`.
    fn person_store() -> TemplateStore {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Person",
            params(&["x", "name"]),
            [
                Instance::triple(Term::var("x"), iri("rdf:type"), iri("ex:Person")),
                Instance::triple(Term::var("x"), iri("ex:name"), Term::var("name")),
            ],
        ));
        store
    }

    fn collect(expansion: Expansion<'_>) -> (Vec<Instance>, Vec<ExpansionError>) {
        let mut ok = Vec::new();
        let mut errors = Vec::new();
        for item in expansion {
            match item {
                Ok(instance) => ok.push(instance),
                Err(err) => errors.push(err),
            }
        }
        (ok, errors)
    }

    #[test]
    fn base_instance_passes_through() {
        let store = TemplateStore::with_base_templates();
        let triple = Instance::triple(iri("ex:a"), iri("ex:p"), iri("ex:b"));
        let (ok, errors) = collect(Expander::new(&store).expand_instance(triple.clone()));
        assert_eq!(ok, vec![triple]);
        assert!(errors.is_empty());
    }

    #[test]
    fn definition_expands_in_body_order() {
        let store = person_store();
        let (ok, errors) = collect(
            Expander::new(&store)
                .expand_instance(Instance::from_terms("ex:Person", [iri("ex:ann"), iri("ex:Ann")])),
        );
        assert!(errors.is_empty());
        assert_eq!(
            ok,
            vec![
                Instance::triple(iri("ex:ann"), iri("rdf:type"), iri("ex:Person")),
                Instance::triple(iri("ex:ann"), iri("ex:name"), iri("ex:Ann")),
            ]
        );
    }

    #[test]
    fn missing_definition_is_an_error() {
        let mut store = TemplateStore::with_base_templates();
        store.add_signature(Signature::new("ex:Sig", params(&["x"])));

        let expander = Expander::new(&store);
        for iri_ in ["ex:Sig", "ex:Unknown"] {
            let (ok, errors) = collect(expander.expand_instance(Instance::from_terms(iri_, [iri("ex:a")])));
            assert!(ok.is_empty());
            match &errors[..] {
                [ExpansionError::MissingDefinition { iri }] => assert_eq!(iri, iri_),
                other => panic!("Expected MissingDefinition error, got {:?}", other),
            }
        }
    }

    #[test]
    fn arity_mismatch_yields_nothing() {
        let store = person_store();
        let (ok, errors) =
            collect(Expander::new(&store).expand_instance(Instance::from_terms("ex:Person", [iri("ex:a")])));
        assert!(ok.is_empty());
        match &errors[..] {
            [ExpansionError::ArityMismatch { expected, got, .. }] => {
                assert_eq!(*expected, 2);
                assert_eq!(*got, 1);
            }
            other => panic!("Expected ArityMismatch error, got {:?}", other),
        }
    }

    #[test]
    fn none_at_required_position_is_dropped() {
        let store = person_store();
        let output = Expander::new(&store)
            .expand_instances([Instance::from_terms("ex:Person", [iri("ex:a"), Term::None])]);
        assert!(output.instances.is_empty());
        assert!(output.messages.is_empty());
    }

    #[test]
    fn type_and_non_blank_checks() {
        let store = TemplateStore::with_base_templates();
        let expander = Expander::new(&store);

        let blank_predicate = Instance::triple(iri("ex:a"), Term::blank("p"), iri("ex:b"));
        let (_, errors) = collect(expander.expand_instance(blank_predicate.clone()));
        assert!(matches!(errors[..], [ExpansionError::BlankForNonBlank { position: 1, .. }]));

        let literal_subject = Instance::triple(Term::plain_literal("x"), iri("ex:p"), iri("ex:b"));
        let (_, errors) = collect(expander.expand_instance(literal_subject));
        assert!(matches!(errors[..], [ExpansionError::IncompatibleType { position: 0, .. }]));

        let unchecked = Expander::with_config(&store, ExpanderConfig::new().with_check_arguments(false));
        let (ok, errors) = collect(unchecked.expand_instance(blank_predicate));
        assert_eq!(ok.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn argument_checks_apply_inside_bodies() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Rel",
            params(&["x"]),
            [
                Instance::triple(Term::var("x"), iri("ex:p"), iri("ex:o")),
                Instance::triple(Term::var("x"), Term::blank("p"), iri("ex:o")),
            ],
        ));
        let call = Instance::from_terms("ex:Rel", [iri("ex:a")]);

        let (ok, errors) = collect(Expander::new(&store).expand_instance(call.clone()));
        assert_eq!(ok, vec![Instance::triple(iri("ex:a"), iri("ex:p"), iri("ex:o"))]);
        match &errors[..] {
            [ExpansionError::BlankForNonBlank { iri: callee, position, .. }] => {
                assert_eq!(callee, vocab::base::TRIPLE);
                assert_eq!(*position, 1);
            }
            other => panic!("Expected BlankForNonBlank error, got {:?}", other),
        }

        let unchecked = Expander::with_config(&store, ExpanderConfig::new().with_check_arguments(false));
        let (ok, errors) = collect(unchecked.expand_instance(call));
        assert_eq!(ok.len(), 2);
        assert!(errors.is_empty());
    }

    #[test]
    fn cross_expands_top_level_lists() {
        let store = person_store();
        let args = ArgumentList::new(vec![
            Argument::expanded(Term::list([iri("ex:a"), iri("ex:b")])),
            Argument::expanded(Term::list([iri("ex:A"), iri("ex:B"), iri("ex:C")])),
        ])
        .with_expander(ListExpander::Cross);
        let output = Expander::new(&store).expand_instances([Instance::new("ex:Person", args)]);
        assert_eq!(output.instances.len(), 12);
        assert!(output.messages.is_empty());
    }

    #[test]
    fn unresolved_expander_at_top_level() {
        let store = person_store();
        let args = ArgumentList::new(vec![
            Argument::expanded(Term::var("xs")),
            Argument::new(iri("ex:N")),
        ])
        .with_expander(ListExpander::Cross);
        let (ok, errors) = collect(Expander::new(&store).expand_instance(Instance::new("ex:Person", args)));
        assert!(ok.is_empty());
        assert!(matches!(errors[..], [ExpansionError::UnresolvedListExpander { .. }]));
    }

    #[test]
    fn zip_max_reports_exhausted_steps() {
        let store = person_store();
        let args = ArgumentList::new(vec![
            Argument::expanded(Term::list([iri("ex:a"), iri("ex:b")])),
            Argument::expanded(Term::list([iri("ex:A"), iri("ex:B"), iri("ex:C"), iri("ex:D")])),
        ])
        .with_expander(ListExpander::ZipMax);
        let results: Vec<_> = Expander::new(&store)
            .expand_instance(Instance::new("ex:Person", args))
            .collect();
        // Two expanded steps of two triples each, then two exhausted steps.
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 4);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(ExpansionError::ZipMaxExhausted { .. })))
                .count(),
            2
        );
    }

    #[test]
    fn blank_nodes_fresh_per_expansion() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Anon",
            params(&["x"]),
            [Instance::triple(Term::var("x"), iri("ex:p"), Term::blank("b"))],
        ));
        let expander = Expander::new(&store);
        let instance = Instance::from_terms("ex:Anon", [iri("ex:a")]);
        let first = expander.expand_instances([instance.clone()]).instances;
        let second = expander.expand_instances([instance]).instances;
        assert_ne!(first[0].arguments().term(2), second[0].arguments().term(2));
    }

    #[test]
    fn iteration_limit_stops_expansion() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Loop",
            params(&["x"]),
            [Instance::from_terms("ex:Loop", [Term::var("x")])],
        ));
        let expander = Expander::with_config(&store, ExpanderConfig::new().with_max_iterations(50));
        let (ok, errors) = collect(expander.expand_instance(Instance::from_terms("ex:Loop", [iri("ex:a")])));
        assert!(ok.is_empty());
        assert_eq!(errors, vec![ExpansionError::IterationLimit { limit: 50 }]);
    }

    #[test]
    fn expand_all_inlines_callees() {
        let mut store = person_store();
        store.add_template(Template::new(
            "ex:Couple",
            params(&["a", "b"]),
            [
                Instance::from_terms("ex:Person", [Term::var("a"), iri("ex:A")]),
                Instance::from_terms("ex:Person", [Term::var("b"), iri("ex:B")]),
                Instance::triple(Term::var("a"), iri("ex:knows"), Term::var("b")),
            ],
        ));

        let result = Expander::new(&store).expand_all();
        assert!(!result.messages.has_errors());
        let body = result.store.body("ex:Couple").unwrap();
        assert_eq!(body.len(), 5);
        assert!(body.iter().all(|i| i.iri() == vocab::base::TRIPLE));
    }

    #[test]
    fn expand_vocabulary_expands_selected_callees() {
        let mut store = person_store();
        store.add_template(Template::new(
            "ex:Named",
            params(&["x"]),
            [Instance::from_terms("ex:Person", [Term::var("x"), iri("ex:N")])],
        ));

        let untouched = Expander::new(&store).expand_vocabulary(&["ex:Other"]);
        assert_eq!(
            untouched.store.body("ex:Named").unwrap()[0].iri(),
            "ex:Person"
        );

        let expanded = Expander::new(&store).expand_vocabulary(&["ex:Person"]);
        assert_eq!(expanded.store.body("ex:Named").unwrap().len(), 2);
    }

    #[test]
    fn optional_variable_not_pushed_into_required_position() {
        let mut store = person_store();
        store.add_template(Template::new(
            "ex:Maybe",
            ParameterList::new(vec![
                Parameter::new("x", Type::top()),
                Parameter::new("n", Type::top()).optional(),
            ]),
            [Instance::from_terms("ex:Person", [Term::var("x"), Term::var("n")])],
        ));
        let result = Expander::new(&store).expand_all();
        let body = result.store.body("ex:Maybe").unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].iri(), "ex:Person");
    }

    #[test]
    fn cycles_copied_unexpanded() {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:Self",
            params(&["x"]),
            [Instance::from_terms("ex:Self", [Term::var("x")])],
        ));
        store.add_template(Template::new(
            "ex:User",
            params(&["x"]),
            [Instance::from_terms("ex:Self", [Term::var("x")])],
        ));

        let result = Expander::new(&store).expand_all();
        assert_eq!(result.messages.error_count(), 1);
        assert_eq!(result.messages.warning_count(), 1);
        assert!(result.store.contains_definition_of("ex:Self"));
        assert!(result.store.contains_definition_of("ex:User"));
    }
}
