//! Composable relational queries.
//!
//! A [`Query`] maps a [`QueryEngine`] and an input [`Tuple`] to a lazy
//! stream of extended tuples. Base relations come from the engine; queries
//! are combined with [`Query::and`], [`Query::or`], [`Query::not`] and
//! [`Query::distinct`].
//!
//! # Example
//!
//! ```
//! use ottr_query::{Query, QueryEngine, Tuple};
//! use ottr_store::TemplateStore;
//!
//! let store = TemplateStore::with_base_templates();
//! let query = Query::template("T").and(Query::is_base("T"));
//! let found: Vec<Tuple> = query.eval(QueryEngine::new(&store), Tuple::new()).collect();
//! assert_eq!(found.len(), 2);
//! ```

use std::fmt;
use std::rc::Rc;

use ottr_store::TemplateStore;

use crate::engine::{QueryEngine, Tuples};
use crate::tuple::Tuple;
use crate::value::Value;

type Relation = dyn for<'s> Fn(QueryEngine<'s>, Tuple) -> Tuples<'s>;

/// A relation over tuples.
///
/// Cloning is cheap; the underlying relation is shared.
#[derive(Clone)]
pub struct Query {
    relation: Rc<Relation>,
}

impl Query {
    pub fn new<F>(relation: F) -> Self
    where
        F: for<'s> Fn(QueryEngine<'s>, Tuple) -> Tuples<'s> + 'static,
    {
        Self {
            relation: Rc::new(relation),
        }
    }

    /// Evaluate this query starting from `tuple`.
    pub fn eval<'s>(&self, engine: QueryEngine<'s>, tuple: Tuple) -> Tuples<'s> {
        (self.relation)(engine, tuple)
    }

    /// Evaluate this query from the empty tuple against `store`.
    pub fn run<'s>(&self, store: &'s TemplateStore) -> Tuples<'s> {
        self.eval(QueryEngine::new(store), Tuple::new())
    }

    // ==========================================================================
    // Connectives
    // ==========================================================================

    /// Every result of `other` evaluated on every result of `self`.
    pub fn and(&self, other: Query) -> Query {
        let left = self.clone();
        Query::new(move |qe, tuple| {
            let right = other.clone();
            Box::new(left.eval(qe, tuple).flat_map(move |t| right.eval(qe, t)))
        })
    }

    /// The results of `self` followed by the results of `other`.
    ///
    /// Duplicates are kept.
    pub fn or(&self, other: Query) -> Query {
        let left = self.clone();
        Query::new(move |qe, tuple| {
            Box::new(left.eval(qe, tuple.clone()).chain(other.eval(qe, tuple)))
        })
    }

    /// The input tuple, if `query` has no result for it.
    pub fn not(query: Query) -> Query {
        Query::new(move |qe, tuple| {
            if query.eval(qe, tuple.clone()).next().is_none() {
                Box::new(std::iter::once(tuple))
            } else {
                Box::new(std::iter::empty())
            }
        })
    }

    /// The results of `query` without repeated tuples.
    pub fn distinct(query: Query) -> Query {
        Query::new(move |qe, tuple| {
            let mut seen: Vec<Tuple> = Vec::new();
            Box::new(query.eval(qe, tuple).filter(move |t| {
                if seen.contains(t) {
                    false
                } else {
                    seen.push(t.clone());
                    true
                }
            }))
        })
    }

    // ==========================================================================
    // Templates
    // ==========================================================================

    pub fn template(template: &str) -> Query {
        let template = template.to_string();
        Query::new(move |qe, t| qe.template(t, &template))
    }

    pub fn parameters(template: &str, params: &str) -> Query {
        let (template, params) = (template.to_string(), params.to_string());
        Query::new(move |qe, t| qe.parameters(t, &template, &params))
    }

    pub fn body(template: &str, body: &str) -> Query {
        let (template, body) = (template.to_string(), body.to_string());
        Query::new(move |qe, t| qe.body(t, &template, &body))
    }

    pub fn instance(body: &str, instance: &str) -> Query {
        let (body, instance) = (body.to_string(), instance.to_string());
        Query::new(move |qe, t| qe.instance(t, &body, &instance))
    }

    pub fn instance_iri(instance: &str, iri: &str) -> Query {
        let (instance, iri) = (instance.to_string(), iri.to_string());
        Query::new(move |qe, t| qe.instance_iri(t, &instance, &iri))
    }

    pub fn arguments(instance: &str, args: &str) -> Query {
        let (instance, args) = (instance.to_string(), args.to_string());
        Query::new(move |qe, t| qe.arguments(t, &instance, &args))
    }

    pub fn is_undefined(template: &str) -> Query {
        let template = template.to_string();
        Query::new(move |qe, t| qe.is_undefined(t, &template))
    }

    pub fn is_signature(template: &str) -> Query {
        let template = template.to_string();
        Query::new(move |qe, t| qe.is_signature(t, &template))
    }

    pub fn is_base(template: &str) -> Query {
        let template = template.to_string();
        Query::new(move |qe, t| qe.is_base(t, &template))
    }

    // ==========================================================================
    // Lists
    // ==========================================================================

    pub fn length(list: &str, len: &str) -> Query {
        let (list, len) = (list.to_string(), len.to_string());
        Query::new(move |qe, t| qe.length(t, &list, &len))
    }

    pub fn index(list: &str, index: &str, val: &str) -> Query {
        let (list, index, val) = (list.to_string(), index.to_string(), val.to_string());
        Query::new(move |qe, t| qe.index(t, &list, &index, &val))
    }

    pub fn is_optional(params: &str, index: &str) -> Query {
        let (params, index) = (params.to_string(), index.to_string());
        Query::new(move |qe, t| qe.is_optional(t, &params, &index))
    }

    pub fn is_non_blank(params: &str, index: &str) -> Query {
        let (params, index) = (params.to_string(), index.to_string());
        Query::new(move |qe, t| qe.is_non_blank(t, &params, &index))
    }

    pub fn has_default(params: &str, index: &str) -> Query {
        let (params, index) = (params.to_string(), index.to_string());
        Query::new(move |qe, t| qe.has_default(t, &params, &index))
    }

    pub fn has_list_expander(args: &str, index: &str) -> Query {
        let (args, index) = (args.to_string(), index.to_string());
        Query::new(move |qe, t| qe.has_list_expander(t, &args, &index))
    }

    pub fn has_expansion_modifier(instance: &str) -> Query {
        let instance = instance.to_string();
        Query::new(move |qe, t| qe.has_expansion_modifier(t, &instance))
    }

    pub fn has_cross(instance: &str) -> Query {
        let instance = instance.to_string();
        Query::new(move |qe, t| qe.has_cross(t, &instance))
    }

    pub fn has_zip_min(instance: &str) -> Query {
        let instance = instance.to_string();
        Query::new(move |qe, t| qe.has_zip_min(t, &instance))
    }

    pub fn has_zip_max(instance: &str) -> Query {
        let instance = instance.to_string();
        Query::new(move |qe, t| qe.has_zip_max(t, &instance))
    }

    // ==========================================================================
    // Terms and types
    // ==========================================================================

    pub fn has_occurrence_at(term: &str, inside: &str, level: &str) -> Query {
        let (term, inside, level) = (term.to_string(), inside.to_string(), level.to_string());
        Query::new(move |qe, t| qe.has_occurrence_at(t, &term, &inside, &level))
    }

    pub fn is_variable(term: &str) -> Query {
        let term = term.to_string();
        Query::new(move |qe, t| qe.is_variable(t, &term))
    }

    pub fn is_blank(term: &str) -> Query {
        let term = term.to_string();
        Query::new(move |qe, t| qe.is_blank(t, &term))
    }

    pub fn is_not_none(term: &str) -> Query {
        let term = term.to_string();
        Query::new(move |qe, t| qe.is_not_none(t, &term))
    }

    pub fn type_of(term: &str, ty: &str) -> Query {
        let (term, ty) = (term.to_string(), ty.to_string());
        Query::new(move |qe, t| qe.type_of(t, &term, &ty))
    }

    pub fn inner_type_at(ty: &str, level: &str, inner: &str) -> Query {
        let (ty, level, inner) = (ty.to_string(), level.to_string(), inner.to_string());
        Query::new(move |qe, t| qe.inner_type_at(t, &ty, &level, &inner))
    }

    pub fn inner_type(ty: &str, inner: &str) -> Query {
        let (ty, inner) = (ty.to_string(), inner.to_string());
        Query::new(move |qe, t| qe.inner_type(t, &ty, &inner))
    }

    /// `list` is the list type with element type `ty`.
    pub fn list_type(ty: &str, list: &str) -> Query {
        let (ty, list) = (ty.to_string(), list.to_string());
        Query::new(move |qe, t| qe.list_type(t, &ty, &list))
    }

    pub fn is_sub_type_of(sub: &str, sup: &str) -> Query {
        let (sub, sup) = (sub.to_string(), sup.to_string());
        Query::new(move |qe, t| qe.is_sub_type_of(t, &sub, &sup))
    }

    pub fn is_compatible_with(ty: &str, other: &str) -> Query {
        let (ty, other) = (ty.to_string(), other.to_string());
        Query::new(move |qe, t| qe.is_compatible_with(t, &ty, &other))
    }

    // ==========================================================================
    // Unification
    // ==========================================================================

    pub fn unifies_val(val1: &str, val2: &str, unifier: &str) -> Query {
        let (a, b, u) = (val1.to_string(), val2.to_string(), unifier.to_string());
        Query::new(move |qe, t| qe.unifies_val(t, &a, &b, &u))
    }

    pub fn unifies_params(params1: &str, params2: &str, unifier: &str) -> Query {
        let (a, b, u) = (params1.to_string(), params2.to_string(), unifier.to_string());
        Query::new(move |qe, t| qe.unifies_params(t, &a, &b, &u))
    }

    pub fn unifies_params_unordered(params1: &str, params2: &str, unifier: &str) -> Query {
        let (a, b, u) = (params1.to_string(), params2.to_string(), unifier.to_string());
        Query::new(move |qe, t| qe.unifies_params_unordered(t, &a, &b, &u))
    }

    pub fn unifies_body(body1: &str, body2: &str, unifier: &str) -> Query {
        let (a, b, u) = (body1.to_string(), body2.to_string(), unifier.to_string());
        Query::new(move |qe, t| qe.unifies_body(t, &a, &b, &u))
    }

    pub fn merge(unifier1: &str, unifier2: &str, unifier: &str) -> Query {
        let (a, b, u) = (unifier1.to_string(), unifier2.to_string(), unifier.to_string());
        Query::new(move |qe, t| qe.merge(t, &a, &b, &u))
    }

    pub fn apply_unifier(elem: &str, unifier: &str, unified: &str) -> Query {
        let (e, u, r) = (elem.to_string(), unifier.to_string(), unified.to_string());
        Query::new(move |qe, t| qe.apply_unifier(t, &e, &u, &r))
    }

    // ==========================================================================
    // Comparison and dependencies
    // ==========================================================================

    pub fn equals(a: &str, b: &str) -> Query {
        let (a, b) = (a.to_string(), b.to_string());
        Query::new(move |qe, t| qe.equals(t, &a, &b))
    }

    pub fn not_equals(a: &str, b: &str) -> Query {
        let (a, b) = (a.to_string(), b.to_string());
        Query::new(move |qe, t| qe.not_equals(t, &a, &b))
    }

    pub fn remove_symmetry(a: &str, b: &str) -> Query {
        let (a, b) = (a.to_string(), b.to_string());
        Query::new(move |qe, t| qe.remove_symmetry(t, &a, &b))
    }

    pub fn is_dependency_of(instance: &str, template: &str) -> Query {
        let (instance, template) = (instance.to_string(), template.to_string());
        Query::new(move |qe, t| qe.is_dependency_of(t, &instance, &template))
    }

    pub fn depends_transitive(template: &str, instance: &str) -> Query {
        let (template, instance) = (template.to_string(), instance.to_string());
        Query::new(move |qe, t| qe.depends_transitive(t, &template, &instance))
    }

    /// Bind `var` to a constant.
    pub fn bind(var: &str, value: impl Into<Value>) -> Query {
        let (var, value) = (var.to_string(), value.into());
        Query::new(move |_, t| Box::new(std::iter::once(t.bind(&var, value.clone()))))
    }

    // ==========================================================================
    // Shortcuts
    // ==========================================================================

    /// `param` is the parameter at `index` of `template`.
    pub fn parameter_index(template: &str, index: &str, param: &str) -> Query {
        let params = Tuple::fresh_var();
        Query::parameters(template, &params).and(Query::index(&params, index, param))
    }

    /// `arg` is the argument term at `index` of `instance`.
    pub fn argument_index(instance: &str, index: &str, arg: &str) -> Query {
        let args = Tuple::fresh_var();
        Query::arguments(instance, &args).and(Query::index(&args, index, arg))
    }

    /// `instance` is in the body of `template`.
    pub fn body_instance(template: &str, instance: &str) -> Query {
        let body = Tuple::fresh_var();
        Query::body(template, &body).and(Query::instance(&body, instance))
    }

    /// `ty` is the type expected at list depth `level` of argument `index`
    /// of `instance`, according to the callee's parameter.
    ///
    /// A marked argument is expected to be a list of the parameter type.
    pub fn used_as_type(instance: &str, index: &str, level: &str, ty: &str) -> Query {
        let callee = Tuple::fresh_var();
        let param = Tuple::fresh_var();
        let param_type = Tuple::fresh_var();
        let args = Tuple::fresh_var();
        let list_type = Tuple::fresh_var();

        let marked = Query::has_list_expander(&args, index)
            .and(Query::list_type(&param_type, &list_type))
            .and(Query::inner_type_at(&list_type, level, ty));
        let unmarked = Query::not(Query::has_list_expander(&args, index))
            .and(Query::inner_type_at(&param_type, level, ty));

        Query::instance_iri(instance, &callee)
            .and(Query::parameter_index(&callee, index, &param))
            .and(Query::arguments(instance, &args))
            .and(Query::type_of(&param, &param_type))
            .and(marked.or(unmarked))
    }

    // ==========================================================================
    // Predefined queries
    // ==========================================================================

    /// Distinct templates `T1` and `T2` whose parameters unify in some order
    /// and whose body `B1` unifies into `B2`, extending the unifier `U`.
    pub fn unifies() -> Query {
        Query::template("T1")
            .and(Query::template("T2"))
            .and(Query::not_equals("T1", "T2"))
            .and(Query::parameters("T1", "P1"))
            .and(Query::parameters("T2", "P2"))
            .and(Query::unifies_params_unordered("P1", "P2", "U"))
            .and(Query::body("T1", "B1"))
            .and(Query::body("T2", "B2"))
            .and(Query::unifies_body("B1", "B2", "U"))
    }

    /// Templates `T1` and `T2` that unify into each other, with unifiers `U1`
    /// and `U2`.
    pub fn equal() -> Query {
        Query::template("T1")
            .and(Query::template("T2"))
            .and(Query::not_equals("T1", "T2"))
            .and(Query::remove_symmetry("T1", "T2"))
            .and(Query::parameters("T1", "P1"))
            .and(Query::parameters("T2", "P2"))
            .and(Query::body("T1", "B1"))
            .and(Query::body("T2", "B2"))
            .and(Query::length("B1", "N"))
            .and(Query::length("B2", "N"))
            .and(Query::unifies_params_unordered("P1", "P2", "U1"))
            .and(Query::unifies_body("B1", "B2", "U1"))
            .and(Query::unifies_params_unordered("P2", "P1", "U2"))
            .and(Query::unifies_body("B2", "B1", "U2"))
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").finish_non_exhaustive()
    }
}
