//! Base relations evaluated against a template store.
//!
//! Every relation takes the current [`Tuple`] and the names of its
//! variables. A relation binds each of its output variables that is still
//! unbound and checks the ones that are already bound, so the same relation
//! works in any direction the query needs. Input variables (for instance the
//! instance of [`QueryEngine::arguments`]) must already be bound.

use std::collections::VecDeque;
use std::iter;

use rustc_hash::FxHashSet;

use ottr_core::{
    ArgumentList, ListExpander, Parameter, Substitution, Type, unify_bodies, unify_term_lists,
    unify_term_lists_unordered,
};
use ottr_store::{NodeKind, TemplateNode, TemplateStore};

use crate::tuple::Tuple;
use crate::value::Value;

/// A lazy stream of result tuples.
pub type Tuples<'s> = Box<dyn Iterator<Item = Tuple> + 's>;

/// Evaluates base relations over a borrowed [`TemplateStore`].
#[derive(Clone, Copy)]
pub struct QueryEngine<'s> {
    store: &'s TemplateStore,
}

fn one<'s>(tuple: Tuple) -> Tuples<'s> {
    Box::new(iter::once(tuple))
}

fn none<'s>() -> Tuples<'s> {
    Box::new(iter::empty())
}

fn keep<'s>(tuple: Tuple, holds: bool) -> Tuples<'s> {
    if holds { one(tuple) } else { none() }
}

fn many<'s>(tuples: Vec<Tuple>) -> Tuples<'s> {
    Box::new(tuples.into_iter())
}

/// Bind `var` to `value`, or check an existing binding against it.
fn bind_or_check<'s>(tuple: Tuple, var: &str, value: Value) -> Tuples<'s> {
    match tuple.get(var) {
        Some(bound) => keep(tuple.clone(), *bound == value),
        None => one(tuple.bind(var, value)),
    }
}

fn bind_each<'s>(tuple: Tuple, var: &str, values: impl IntoIterator<Item = Value>) -> Tuples<'s> {
    match tuple.get(var) {
        Some(bound) => {
            let bound = bound.clone();
            keep(tuple, values.into_iter().any(|v| v == bound))
        }
        None => many(values.into_iter().map(|v| tuple.bind(var, v)).collect()),
    }
}

impl<'s> QueryEngine<'s> {
    pub fn new(store: &'s TemplateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'s TemplateStore {
        self.store
    }

    // ==========================================================================
    // Templates
    // ==========================================================================

    /// `template` is an IRI the store knows, including undefined references.
    pub fn template(self, tuple: Tuple, template: &str) -> Tuples<'s> {
        if tuple.has_bound(template) {
            let known = self.store.node(tuple.iri(template)).is_some();
            return keep(tuple, known);
        }
        let mut iris: Vec<&str> = self.store.nodes().map(TemplateNode::iri).collect();
        iris.sort_unstable();
        bind_each(
            tuple,
            template,
            iris.into_iter().map(|iri| Value::Iri(iri.to_string())),
        )
    }

    pub fn parameters(self, tuple: Tuple, template: &str, params: &str) -> Tuples<'s> {
        match self.store.parameters(tuple.iri(template)) {
            Some(list) => bind_or_check(tuple, params, Value::Parameters(list.clone())),
            None => none(),
        }
    }

    /// The body of a definition; nothing for signatures and base templates.
    pub fn body(self, tuple: Tuple, template: &str, body: &str) -> Tuples<'s> {
        let Some(instances) = self.store.body(tuple.iri(template)) else {
            return none();
        };
        match tuple.get(body) {
            Some(Value::Body(bound)) => {
                let same = bound.len() == instances.len()
                    && bound.iter().all(|i| instances.contains(i));
                keep(tuple, same)
            }
            Some(_) => none(),
            None => one(tuple.bind(body, Value::Body(instances))),
        }
    }

    pub fn instance(self, tuple: Tuple, body: &str, instance: &str) -> Tuples<'s> {
        let instances = tuple.body(body).to_vec();
        bind_each(tuple, instance, instances.into_iter().map(Value::Instance))
    }

    pub fn instance_iri(self, tuple: Tuple, instance: &str, iri: &str) -> Tuples<'s> {
        let value = Value::Iri(tuple.instance(instance).iri().to_string());
        bind_or_check(tuple, iri, value)
    }

    pub fn arguments(self, tuple: Tuple, instance: &str, args: &str) -> Tuples<'s> {
        let value = Value::Arguments(tuple.instance(instance).arguments().clone());
        bind_or_check(tuple, args, value)
    }

    pub fn is_undefined(self, tuple: Tuple, template: &str) -> Tuples<'s> {
        let kind = self.store.kind(tuple.iri(template));
        keep(tuple, matches!(kind, None | Some(NodeKind::Undefined)))
    }

    pub fn is_signature(self, tuple: Tuple, template: &str) -> Tuples<'s> {
        let known = self.store.contains_signature(tuple.iri(template));
        keep(tuple, known)
    }

    pub fn is_base(self, tuple: Tuple, template: &str) -> Tuples<'s> {
        let base = self.store.contains_base(tuple.iri(template));
        keep(tuple, base)
    }

    // ==========================================================================
    // Lists
    // ==========================================================================

    /// Length of a parameter, argument, term or body list.
    pub fn length(self, tuple: Tuple, list: &str, len: &str) -> Tuples<'s> {
        match tuple.value(list).list_len() {
            Some(n) => bind_or_check(tuple, len, Value::Int(n)),
            None => none(),
        }
    }

    /// `val` is the term at position `index` of `list`.
    pub fn index(self, tuple: Tuple, list: &str, index: &str, val: &str) -> Tuples<'s> {
        let list_value = tuple.value(list).clone();
        if tuple.has_bound(index) {
            return match list_value.term_at(tuple.int(index)) {
                Some(term) => bind_or_check(tuple, val, Value::Term(term)),
                None => none(),
            };
        }
        let bound_val = tuple.get(val).cloned();
        let n = list_value.list_len().unwrap_or(0);
        let tuples = (0..n)
            .filter_map(|i| list_value.term_at(i).map(|term| (i, term)))
            .filter(|(_, term)| match &bound_val {
                Some(Value::Term(bound)) => bound == term,
                Some(_) => false,
                None => true,
            })
            .map(|(i, term)| tuple.bind(index, i).bind(val, term))
            .collect();
        many(tuples)
    }

    /// Bind or check `index` against positions of `len` satisfying `holds`.
    fn indices_where(
        tuple: Tuple,
        index: &str,
        len: usize,
        holds: impl Fn(usize) -> bool,
    ) -> Tuples<'s> {
        if tuple.has_bound(index) {
            let i = tuple.int(index);
            return keep(tuple, i < len && holds(i));
        }
        many((0..len).filter(|i| holds(*i)).map(|i| tuple.bind(index, i)).collect())
    }

    fn parameter_flag(
        tuple: Tuple,
        params: &str,
        index: &str,
        flag: fn(&Parameter) -> bool,
    ) -> Tuples<'s> {
        let list = tuple.parameters(params).clone();
        Self::indices_where(tuple, index, list.len(), |i| list.get(i).is_some_and(flag))
    }

    pub fn is_optional(self, tuple: Tuple, params: &str, index: &str) -> Tuples<'s> {
        Self::parameter_flag(tuple, params, index, Parameter::is_optional)
    }

    pub fn is_non_blank(self, tuple: Tuple, params: &str, index: &str) -> Tuples<'s> {
        Self::parameter_flag(tuple, params, index, Parameter::is_non_blank)
    }

    pub fn has_default(self, tuple: Tuple, params: &str, index: &str) -> Tuples<'s> {
        Self::parameter_flag(tuple, params, index, Parameter::has_default)
    }

    /// The argument at `index` of `args` is marked for list expansion.
    pub fn has_list_expander(self, tuple: Tuple, args: &str, index: &str) -> Tuples<'s> {
        let list: ArgumentList = tuple.arguments(args).clone();
        Self::indices_where(tuple, index, list.len(), |i| list.has_list_expander_at(i))
    }

    fn modifier(tuple: Tuple, instance: &str, test: impl Fn(Option<ListExpander>) -> bool) -> Tuples<'s> {
        let holds = test(tuple.instance(instance).expander());
        keep(tuple, holds)
    }

    pub fn has_expansion_modifier(self, tuple: Tuple, instance: &str) -> Tuples<'s> {
        Self::modifier(tuple, instance, |e| e.is_some())
    }

    pub fn has_cross(self, tuple: Tuple, instance: &str) -> Tuples<'s> {
        Self::modifier(tuple, instance, |e| e == Some(ListExpander::Cross))
    }

    pub fn has_zip_min(self, tuple: Tuple, instance: &str) -> Tuples<'s> {
        Self::modifier(tuple, instance, |e| e == Some(ListExpander::ZipMin))
    }

    pub fn has_zip_max(self, tuple: Tuple, instance: &str) -> Tuples<'s> {
        Self::modifier(tuple, instance, |e| e == Some(ListExpander::ZipMax))
    }

    // ==========================================================================
    // Terms and types
    // ==========================================================================

    /// `inside` is a non-list term nested `level` lists deep in `term`.
    pub fn has_occurrence_at(self, tuple: Tuple, term: &str, inside: &str, level: &str) -> Tuples<'s> {
        let bound_level = tuple.has_bound(level).then(|| tuple.int(level));
        let outer = tuple.term(term).clone();
        let tuples = outer
            .occurrences()
            .into_iter()
            .filter(|(t, depth)| !t.is_list() && bound_level.is_none_or(|l| l == *depth))
            .flat_map(|(t, depth)| {
                bind_or_check(tuple.bind(level, depth), inside, Value::Term(t.clone()))
            })
            .collect();
        many(tuples)
    }

    pub fn is_variable(self, tuple: Tuple, term: &str) -> Tuples<'s> {
        let holds = tuple.term(term).is_variable();
        keep(tuple, holds)
    }

    pub fn is_blank(self, tuple: Tuple, term: &str) -> Tuples<'s> {
        let holds = tuple.term(term).is_blank();
        keep(tuple, holds)
    }

    pub fn is_not_none(self, tuple: Tuple, term: &str) -> Tuples<'s> {
        let holds = !tuple.term(term).is_none();
        keep(tuple, holds)
    }

    /// The declared type of a variable, the intrinsic type of anything else.
    pub fn type_of(self, tuple: Tuple, term: &str, ty: &str) -> Tuples<'s> {
        let actual = tuple.term(term).ty();
        bind_or_check(tuple, ty, Value::Type(actual))
    }

    /// `inner` is `ty` unwrapped `level` list types deep.
    ///
    /// With `level` unbound, every nesting depth of `ty` is produced.
    pub fn inner_type_at(self, tuple: Tuple, ty: &str, level: &str, inner: &str) -> Tuples<'s> {
        let outer = tuple.ty(ty).clone();
        if tuple.has_bound(level) {
            return match outer.inner_at(tuple.int(level)) {
                Some(found) => bind_or_check(tuple, inner, Value::Type(found.clone())),
                None => none(),
            };
        }
        let mut tuples = Vec::new();
        let mut current = Some(&outer);
        let mut depth = 0;
        while let Some(found) = current {
            tuples.extend(bind_or_check(
                tuple.bind(level, depth),
                inner,
                Value::Type(found.clone()),
            ));
            current = found.inner();
            depth += 1;
        }
        many(tuples)
    }

    pub fn inner_type(self, tuple: Tuple, ty: &str, inner: &str) -> Tuples<'s> {
        let found = tuple.ty(ty).inner().cloned();
        match found {
            Some(found) => bind_or_check(tuple, inner, Value::Type(found)),
            None => none(),
        }
    }

    pub fn list_type(self, tuple: Tuple, ty: &str, list: &str) -> Tuples<'s> {
        let wrapped = Type::list(tuple.ty(ty).clone());
        bind_or_check(tuple, list, Value::Type(wrapped))
    }

    pub fn is_sub_type_of(self, tuple: Tuple, sub: &str, sup: &str) -> Tuples<'s> {
        let holds = tuple.ty(sub).is_sub_type_of(tuple.ty(sup));
        keep(tuple, holds)
    }

    pub fn is_compatible_with(self, tuple: Tuple, ty: &str, other: &str) -> Tuples<'s> {
        let holds = tuple.ty(ty).is_compatible_with(tuple.ty(other));
        keep(tuple, holds)
    }

    // ==========================================================================
    // Unification
    // ==========================================================================

    /// `unifier` maps both terms to their unification.
    pub fn unifies_val(self, tuple: Tuple, val1: &str, val2: &str, unifier: &str) -> Tuples<'s> {
        let (a, b) = (tuple.term(val1), tuple.term(val2));
        if tuple.has_bound(unifier) {
            let subst = tuple.substitution(unifier);
            let holds = subst.apply(a) == subst.apply(b);
            return keep(tuple, holds);
        }
        let Some(unified) = a.unify(b) else {
            return none();
        };
        let mut subst = Substitution::new();
        if *a != unified {
            subst.insert(a.clone(), unified.clone());
        }
        if *b != unified {
            subst.insert(b.clone(), unified);
        }
        one(tuple.bind(unifier, Value::Substitution(subst)))
    }

    /// Position-wise unifier of two parameter lists.
    pub fn unifies_params(self, tuple: Tuple, params1: &str, params2: &str, unifier: &str) -> Tuples<'s> {
        let found = unify_term_lists(
            &tuple.parameters(params1).terms(),
            &tuple.parameters(params2).terms(),
        );
        match found {
            Some(subst) => bind_or_check(tuple, unifier, Value::Substitution(subst)),
            None => none(),
        }
    }

    /// Every unifier of `params1` with a permutation of `params2`.
    pub fn unifies_params_unordered(
        self,
        tuple: Tuple,
        params1: &str,
        params2: &str,
        unifier: &str,
    ) -> Tuples<'s> {
        let found = unify_term_lists_unordered(
            &tuple.parameters(params1).terms(),
            &tuple.parameters(params2).terms(),
        );
        bind_each(tuple, unifier, found.into_iter().map(Value::Substitution))
    }

    /// Every unifier mapping `body1` injectively into `body2`.
    ///
    /// A bound `unifier` is extended: only body unifiers consistent with it
    /// are kept, and `unifier` is rebound to the merge.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn unifies_body(self, tuple: Tuple, body1: &str, body2: &str, unifier: &str) -> Tuples<'s> {
        let found = unify_bodies(tuple.body(body1), tuple.body(body2));
        let base = match tuple.get(unifier) {
            Some(Value::Substitution(subst)) => subst.clone(),
            Some(_) => return none(),
            None => Substitution::new(),
        };
        let tuples = found
            .iter()
            .filter_map(|subst| base.merge_with_unification(subst))
            .map(|merged| tuple.bind(unifier, Value::Substitution(merged)))
            .collect();
        many(tuples)
    }

    pub fn merge(self, tuple: Tuple, unifier1: &str, unifier2: &str, unifier: &str) -> Tuples<'s> {
        let merged = tuple
            .substitution(unifier1)
            .merge_with_unification(tuple.substitution(unifier2));
        match merged {
            Some(subst) => bind_or_check(tuple, unifier, Value::Substitution(subst)),
            None => none(),
        }
    }

    /// `unified` is `elem` rewritten by `unifier`.
    pub fn apply_unifier(self, tuple: Tuple, elem: &str, unifier: &str, unified: &str) -> Tuples<'s> {
        let subst = tuple.substitution(unifier);
        let applied = match tuple.value(elem) {
            Value::Term(term) => Value::Term(subst.apply(term)),
            Value::Terms(terms) => Value::Terms(terms.iter().map(|t| subst.apply(t)).collect()),
            Value::Arguments(args) => Value::Arguments(subst.apply_arguments(args)),
            Value::Instance(instance) => Value::Instance(subst.apply_instance(instance)),
            Value::Body(body) => {
                Value::Body(body.iter().map(|i| subst.apply_instance(i)).collect())
            }
            _ => return none(),
        };
        bind_or_check(tuple, unified, applied)
    }

    // ==========================================================================
    // Comparison
    // ==========================================================================

    pub fn equals(self, tuple: Tuple, a: &str, b: &str) -> Tuples<'s> {
        let holds = tuple.value(a) == tuple.value(b);
        keep(tuple, holds)
    }

    pub fn not_equals(self, tuple: Tuple, a: &str, b: &str) -> Tuples<'s> {
        let holds = tuple.value(a) != tuple.value(b);
        keep(tuple, holds)
    }

    /// Keep one of each symmetric pair: integers by value, anything else by
    /// display form.
    pub fn remove_symmetry(self, tuple: Tuple, a: &str, b: &str) -> Tuples<'s> {
        let holds = match (tuple.value(a), tuple.value(b)) {
            (Value::Int(x), Value::Int(y)) => x <= y,
            (x, y) => x.to_string() <= y.to_string(),
        };
        keep(tuple, holds)
    }

    // ==========================================================================
    // Dependencies
    // ==========================================================================

    /// `template` instantiates `instance` directly in its body.
    pub fn is_dependency_of(self, tuple: Tuple, instance: &str, template: &str) -> Tuples<'s> {
        let mut users: Vec<String> = self.store.depends_on(tuple.iri(instance)).into_iter().collect();
        users.sort_unstable();
        bind_each(tuple, template, users.into_iter().map(Value::Iri))
    }

    /// `instance` is reachable from `template` through one or more bodies.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn depends_transitive(self, tuple: Tuple, template: &str, instance: &str) -> Tuples<'s> {
        let start = tuple.iri(template).to_string();
        let target = tuple.has_bound(instance).then(|| tuple.iri(instance).to_string());

        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut reached = Vec::new();
        let mut queue: VecDeque<String> = self.direct_dependencies(&start).into();
        while let Some(next) = queue.pop_front() {
            if !visited.insert(next.clone()) {
                continue;
            }
            if target.as_deref() == Some(next.as_str()) {
                return one(tuple);
            }
            queue.extend(self.direct_dependencies(&next));
            reached.push(next);
        }

        if target.is_some() {
            return none();
        }
        bind_each(tuple, instance, reached.into_iter().map(Value::Iri))
    }

    fn direct_dependencies(&self, iri: &str) -> Vec<String> {
        let mut deps: Vec<String> = self
            .store
            .dependencies(iri)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        deps.sort_unstable();
        deps
    }
}

impl std::fmt::Debug for QueryEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("templates", &self.store.template_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ottr_core::{Instance, ParameterList, Template, Term};

    fn params(labels: &[&str]) -> ParameterList {
        labels
            .iter()
            .map(|l| Parameter::new(*l, Type::top()))
            .collect()
    }

    fn store() -> TemplateStore {
        let mut store = TemplateStore::with_base_templates();
        store.add_template(Template::new(
            "ex:A",
            params(&["x"]),
            [Instance::from_terms("ex:B", [Term::var("x")])],
        ));
        store.add_template(Template::new(
            "ex:B",
            params(&["y"]),
            [Instance::triple(Term::var("y"), Term::iri("ex:p"), Term::iri("ex:o"))],
        ));
        store
    }

    #[test]
    fn template_verifies_and_enumerates() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let all: Vec<_> = qe.template(Tuple::new(), "T").collect();
        assert_eq!(all.len(), store.node_count());

        let bound = Tuple::new().bind("T", Value::Iri("ex:A".into()));
        assert_eq!(qe.template(bound, "T").count(), 1);
        let unknown = Tuple::new().bind("T", Value::Iri("ex:Nope".into()));
        assert_eq!(qe.template(unknown, "T").count(), 0);
    }

    #[test]
    fn index_binds_every_position() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new().bind("P", Value::Parameters(params(&["a", "b", "c"])));
        let found: Vec<_> = qe.index(tuple.clone(), "P", "I", "V").collect();
        assert_eq!(found.len(), 3);
        assert_eq!(found[2].int("I"), 2);

        let with_val = tuple.bind("V", Term::var("b"));
        let found: Vec<_> = qe.index(with_val, "P", "I", "V").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].int("I"), 1);
    }

    #[test]
    fn occurrences_are_leaves_with_depth() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let term = Term::list([Term::var("a"), Term::list([Term::var("b")])]);
        let tuple = Tuple::new().bind("Arg", term);
        let found: Vec<_> = qe.has_occurrence_at(tuple.clone(), "Arg", "Val", "Lvl").collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].term("Val"), &Term::var("b"));
        assert_eq!(found[1].int("Lvl"), 2);

        let at_one = tuple.bind("Lvl", 1usize);
        assert_eq!(qe.has_occurrence_at(at_one, "Arg", "Val", "Lvl").count(), 1);
    }

    #[test]
    fn inner_types_enumerated() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new().bind("T", Type::list(Type::list(Type::iri())));
        let found: Vec<_> = qe.inner_type_at(tuple, "T", "L", "I").collect();
        assert_eq!(found.len(), 3);
        assert_eq!(found[2].ty("I"), &Type::iri());
    }

    #[test]
    fn transitive_dependencies() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new().bind("T", Value::Iri("ex:A".into()));
        let reached: Vec<String> = qe
            .depends_transitive(tuple.clone(), "T", "D")
            .map(|t| t.iri("D").to_string())
            .collect();
        assert_eq!(reached, vec!["ex:B".to_string(), ottr_core::vocab::base::TRIPLE.to_string()]);

        let self_loop = tuple.bind("D", Value::Iri("ex:A".into()));
        assert_eq!(qe.depends_transitive(self_loop, "T", "D").count(), 0);
    }

    #[test]
    fn dependency_of_lists_users() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new().bind("I", Value::Iri("ex:B".into()));
        let users: Vec<_> = qe.is_dependency_of(tuple, "I", "T").collect();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].iri("T"), "ex:A");
    }

    #[test]
    fn unifies_val_maps_both_sides() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new()
            .bind("A", Term::var("x"))
            .bind("B", Term::iri("ex:a"));
        let found: Vec<_> = qe.unifies_val(tuple, "A", "B", "U").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].substitution("U").get(&Term::var("x")),
            Some(&Term::iri("ex:a"))
        );
    }

    #[test]
    fn unifies_params_unordered_finds_permutations() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new()
            .bind("P1", Value::Parameters(params(&["a", "b"])))
            .bind("P2", Value::Parameters(params(&["c", "d"])));
        assert_eq!(qe.unifies_params(tuple.clone(), "P1", "P2", "U").count(), 1);
        assert_eq!(qe.unifies_params_unordered(tuple, "P1", "P2", "U").count(), 2);
    }

    #[test]
    fn apply_unifier_rewrites_instances() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let subst: Substitution = [(Term::var("x"), Term::iri("ex:a"))].into_iter().collect();
        let tuple = Tuple::new()
            .bind("I", Instance::from_terms("ex:B", [Term::var("x")]))
            .bind("U", Value::Substitution(subst));
        let found: Vec<_> = qe.apply_unifier(tuple, "I", "U", "J").collect();
        assert_eq!(
            found[0].instance("J"),
            &Instance::from_terms("ex:B", [Term::iri("ex:a")])
        );
    }

    #[test]
    fn remove_symmetry_orders_ints_numerically() {
        let store = store();
        let qe = QueryEngine::new(&store);
        let tuple = Tuple::new().bind("A", 2usize).bind("B", 10usize);
        assert_eq!(qe.remove_symmetry(tuple.clone(), "A", "B").count(), 1);
        assert_eq!(qe.remove_symmetry(tuple, "B", "A").count(), 0);
    }
}
