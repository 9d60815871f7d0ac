//! Immutable variable bindings.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;

use ottr_core::{
    ArgumentList, Instance, InvariantViolation, ParameterList, Substitution, Term, Type,
};

use crate::value::Value;

static FRESH_VARIABLES: AtomicUsize = AtomicUsize::new(0);

/// A set of variable bindings.
///
/// Tuples are persistent: [`Tuple::bind`] returns a new tuple and leaves
/// the receiver unchanged. Values are shared between tuples.
///
/// The typed getters read a variable the caller knows to be bound to a
/// value of that kind. Reading an unbound variable, or one holding another
/// kind of value, is a bug in the query and raises an
/// [`InvariantViolation`].
#[derive(Clone, Default, PartialEq)]
pub struct Tuple {
    values: FxHashMap<String, Rc<Value>>,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// A variable name no query has used before.
    pub fn fresh_var() -> String {
        let n = FRESH_VARIABLES.fetch_add(1, Ordering::Relaxed);
        format!("_v{}", n)
    }

    /// A copy of this tuple with `var` bound to `value`.
    pub fn bind(&self, var: &str, value: impl Into<Value>) -> Tuple {
        let mut values = self.values.clone();
        values.insert(var.to_string(), Rc::new(value.into()));
        Tuple { values }
    }

    pub fn get(&self, var: &str) -> Option<&Value> {
        self.values.get(var).map(Rc::as_ref)
    }

    pub fn has_bound(&self, var: &str) -> bool {
        self.values.contains_key(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of a bound variable.
    pub fn value(&self, var: &str) -> &Value {
        match self.get(var) {
            Some(value) => value,
            None => InvariantViolation::UnboundVariable {
                variable: var.to_string(),
            }
            .raise(),
        }
    }

    /// Display form of a bound variable, for diagnostics.
    pub fn show(&self, var: &str) -> String {
        self.value(var).to_string()
    }

    /// A bound index shown 1-based, for diagnostics.
    pub fn show_position(&self, var: &str) -> String {
        (self.int(var) + 1).to_string()
    }

    // ==========================================================================
    // Typed access
    // ==========================================================================

    pub fn iri(&self, var: &str) -> &str {
        match self.value(var) {
            Value::Iri(iri) => iri,
            other => wrong_kind(var, "iri", other),
        }
    }

    pub fn term(&self, var: &str) -> &Term {
        match self.value(var) {
            Value::Term(term) => term,
            other => wrong_kind(var, "term", other),
        }
    }

    pub fn parameters(&self, var: &str) -> &ParameterList {
        match self.value(var) {
            Value::Parameters(params) => params,
            other => wrong_kind(var, "parameters", other),
        }
    }

    pub fn arguments(&self, var: &str) -> &ArgumentList {
        match self.value(var) {
            Value::Arguments(args) => args,
            other => wrong_kind(var, "arguments", other),
        }
    }

    pub fn instance(&self, var: &str) -> &Instance {
        match self.value(var) {
            Value::Instance(instance) => instance,
            other => wrong_kind(var, "instance", other),
        }
    }

    pub fn body(&self, var: &str) -> &[Instance] {
        match self.value(var) {
            Value::Body(body) => body,
            other => wrong_kind(var, "body", other),
        }
    }

    pub fn int(&self, var: &str) -> usize {
        match self.value(var) {
            Value::Int(n) => *n,
            other => wrong_kind(var, "int", other),
        }
    }

    pub fn ty(&self, var: &str) -> &Type {
        match self.value(var) {
            Value::Type(ty) => ty,
            other => wrong_kind(var, "type", other),
        }
    }

    pub fn substitution(&self, var: &str) -> &Substitution {
        match self.value(var) {
            Value::Substitution(subst) => subst,
            other => wrong_kind(var, "substitution", other),
        }
    }
}

fn wrong_kind(var: &str, expected: &'static str, found: &Value) -> ! {
    InvariantViolation::WrongValueKind {
        variable: var.to_string(),
        expected,
        found: found.kind(),
    }
    .raise()
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vars: Vec<_> = self.values.iter().collect();
        vars.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_map()
            .entries(vars.into_iter().map(|(k, v)| (k, v.to_string())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_does_not_mutate() {
        let empty = Tuple::new();
        let bound = empty.bind("X", Term::iri("ex:a"));
        assert!(empty.is_empty());
        assert!(!empty.has_bound("X"));
        assert_eq!(bound.term("X"), &Term::iri("ex:a"));
    }

    #[test]
    fn rebinding_replaces_value() {
        let tuple = Tuple::new().bind("N", 1usize).bind("N", 2usize);
        assert_eq!(tuple.int("N"), 2);
        assert_eq!(tuple.len(), 1);
    }

    #[test]
    fn fresh_vars_differ() {
        assert_ne!(Tuple::fresh_var(), Tuple::fresh_var());
    }

    #[test]
    fn position_is_one_based() {
        let tuple = Tuple::new().bind("I", 0usize);
        assert_eq!(tuple.show_position("I"), "1");
    }

    #[test]
    #[should_panic(expected = "variable X is not bound")]
    fn unbound_variable_panics() {
        Tuple::new().term("X");
    }

    #[test]
    #[should_panic(expected = "holds int, expected term")]
    fn wrong_kind_panics() {
        Tuple::new().bind("X", 3usize).term("X");
    }
}
