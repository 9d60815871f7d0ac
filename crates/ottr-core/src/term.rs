//! Terms: the values passed as template arguments.
//!
//! A [`Term`] is an IRI, a literal, a blank node, a variable, a list of
//! terms, or `none`. Terms are immutable values with structural equality;
//! blank nodes and variables are identified by their label alone.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::{Type, TypeRegistry};
use crate::vocab::{self, types as t};

static FRESH_BLANKS: AtomicUsize = AtomicUsize::new(0);

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Datatype IRI. Plain literals use `xsd:string`, language-tagged
    /// literals use `rdf:langString`.
    pub datatype: String,
    /// Language tag, only set when the datatype is `rdf:langString`.
    pub language: Option<String>,
}

/// A template variable.
///
/// Equality and hashing use the label only; the type is the declared type
/// of the parameter the variable stands for.
#[derive(Debug, Clone)]
pub struct Variable {
    label: String,
    ty: Type,
}

impl Variable {
    pub fn new(label: impl Into<String>, ty: Type) -> Self {
        Self {
            label: label.into(),
            ty,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

/// A term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Literal(Literal),
    Blank(String),
    Variable(Variable),
    List(Vec<Term>),
    None,
}

impl Term {
    // ==========================================================================
    // Construction
    // ==========================================================================

    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A literal with an explicit datatype.
    pub fn typed_literal(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: datatype.into(),
            language: None,
        })
    }

    /// A plain literal, typed `xsd:string`.
    pub fn plain_literal(lexical: impl Into<String>) -> Self {
        Self::typed_literal(lexical, t::XSD_STRING)
    }

    /// A language-tagged literal, typed `rdf:langString`.
    pub fn lang_literal(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal(Literal {
            lexical: lexical.into(),
            datatype: t::RDF_LANG_STRING.to_string(),
            language: Some(language.into()),
        })
    }

    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    /// A blank node with a label no other call has returned.
    pub fn fresh_blank() -> Self {
        let n = FRESH_BLANKS.fetch_add(1, Ordering::Relaxed);
        Term::Blank(format!("genid{}", n))
    }

    /// A variable typed `rdfs:Resource`.
    pub fn var(label: impl Into<String>) -> Self {
        Term::Variable(Variable::new(label, Type::top()))
    }

    pub fn typed_var(label: impl Into<String>, ty: Type) -> Self {
        Term::Variable(Variable::new(label, ty))
    }

    pub fn list(terms: impl IntoIterator<Item = Term>) -> Self {
        Term::List(terms.into_iter().collect())
    }

    // ==========================================================================
    // Inspection
    // ==========================================================================

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Term::None)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Term::List(_))
    }

    pub fn as_list(&self) -> Option<&[Term]> {
        match self {
            Term::List(terms) => Some(terms),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Returns `true` if no variable occurs in this term.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::List(terms) => terms.iter().all(Term::is_ground),
            _ => true,
        }
    }

    /// Every variable in this term, depth-first.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a Variable>) {
        match self {
            Term::Variable(var) => out.push(var),
            Term::List(terms) => terms.iter().for_each(|t| t.collect_variables(out)),
            _ => {}
        }
    }

    /// Every `(term, depth)` pair in this term, the term itself at depth 0.
    pub fn occurrences(&self) -> Vec<(&Term, usize)> {
        let mut out = Vec::new();
        self.collect_occurrences(0, &mut out);
        out
    }

    fn collect_occurrences<'a>(&'a self, depth: usize, out: &mut Vec<(&'a Term, usize)>) {
        out.push((self, depth));
        if let Term::List(terms) = self {
            for term in terms {
                term.collect_occurrences(depth + 1, out);
            }
        }
    }

    // ==========================================================================
    // Types
    // ==========================================================================

    /// The type of this term: the declared type for variables, the intrinsic
    /// type for everything else.
    pub fn ty(&self) -> Type {
        match self {
            Term::Variable(var) => var.ty.clone(),
            other => other.intrinsic_type(),
        }
    }

    /// The type a term has by construction, independent of how it is used.
    pub fn intrinsic_type(&self) -> Type {
        match self {
            Term::Iri(_) => Type::lub(t::IRI),
            Term::Blank(_) => Type::lub(t::TOP),
            Term::Literal(lit) => TypeRegistry::standard().literal_type(&lit.datatype),
            Term::Variable(var) => var.ty.clone(),
            Term::List(terms) if terms.is_empty() => Type::list(Type::bot()),
            Term::List(_) => Type::ne_list(Type::lub(t::TOP)),
            Term::None => Type::bot(),
        }
    }

    /// Default type for a variable standing in for this term.
    pub fn variable_type(&self) -> Type {
        self.intrinsic_type().remove_lub()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(lang) => write!(f, "\"{}\"@{}", self.lexical, lang),
            None if self.datatype == t::XSD_STRING => write!(f, "\"{}\"", self.lexical),
            None => write!(f, "\"{}\"^^{}", self.lexical, vocab::compact(&self.datatype)),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => f.write_str(&vocab::compact(iri)),
            Term::Literal(lit) => write!(f, "{}", lit),
            Term::Blank(label) => write!(f, "_:{}", label),
            Term::Variable(var) => write!(f, "?{}", var.label),
            Term::List(terms) => {
                f.write_str("(")?;
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", term)?;
                }
                f.write_str(")")
            }
            Term::None => f.write_str("none"),
        }
    }
}
