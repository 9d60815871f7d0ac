//! Values a query variable can be bound to.

use std::fmt;

use ottr_core::{ArgumentList, Instance, ParameterList, Substitution, Term, Type};

/// A bound value in a [`Tuple`](crate::Tuple).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A template IRI.
    Iri(String),
    Term(Term),
    Terms(Vec<Term>),
    Parameters(ParameterList),
    Arguments(ArgumentList),
    Instance(Instance),
    Body(Vec<Instance>),
    /// An index, a length or a nesting level.
    Int(usize),
    Type(Type),
    Substitution(Substitution),
}

impl Value {
    /// Name of the variant, used in invariant violations.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Iri(_) => "iri",
            Value::Term(_) => "term",
            Value::Terms(_) => "terms",
            Value::Parameters(_) => "parameters",
            Value::Arguments(_) => "arguments",
            Value::Instance(_) => "instance",
            Value::Body(_) => "body",
            Value::Int(_) => "int",
            Value::Type(_) => "type",
            Value::Substitution(_) => "substitution",
        }
    }

    /// Number of elements of a list-like value.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Value::Terms(terms) => Some(terms.len()),
            Value::Term(Term::List(terms)) => Some(terms.len()),
            Value::Parameters(params) => Some(params.len()),
            Value::Arguments(args) => Some(args.len()),
            Value::Body(body) => Some(body.len()),
            _ => None,
        }
    }

    /// The term at `index` of a term-carrying list value.
    pub fn term_at(&self, index: usize) -> Option<Term> {
        match self {
            Value::Terms(terms) | Value::Term(Term::List(terms)) => terms.get(index).cloned(),
            Value::Parameters(params) => params.get(index).map(|p| p.term()),
            Value::Arguments(args) => args.term(index).cloned(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Iri(iri) => f.write_str(&ottr_core::vocab::compact(iri)),
            Value::Term(term) => write!(f, "{}", term),
            Value::Terms(terms) => {
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", term)?;
                }
                f.write_str(")")
            }
            Value::Parameters(params) => write!(f, "{}", params),
            Value::Arguments(args) => write!(f, "{}", args),
            Value::Instance(instance) => write!(f, "{}", instance),
            Value::Body(body) => {
                f.write_str("{")?;
                for (i, instance) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", instance)?;
                }
                f.write_str("}")
            }
            Value::Int(n) => write!(f, "{}", n),
            Value::Type(ty) => write!(f, "{}", ty),
            Value::Substitution(subst) => write!(f, "{}", subst),
        }
    }
}

impl From<Term> for Value {
    fn from(term: Term) -> Self {
        Value::Term(term)
    }
}

impl From<Type> for Value {
    fn from(ty: Type) -> Self {
        Value::Type(ty)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}
