//! Template instances.

use std::fmt;

use crate::argument::{Argument, ArgumentList, ListExpander};
use crate::term::Term;
use crate::vocab;

/// A call of a template with concrete arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Instance {
    iri: String,
    arguments: ArgumentList,
}

impl Instance {
    pub fn new(iri: impl Into<String>, arguments: ArgumentList) -> Self {
        Self {
            iri: iri.into(),
            arguments,
        }
    }

    /// An instance with unmarked arguments and no list expander.
    pub fn from_terms(iri: impl Into<String>, terms: impl IntoIterator<Item = Term>) -> Self {
        Self::new(iri, ArgumentList::from_terms(terms))
    }

    /// An `ottr:Triple` instance.
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Self::from_terms(vocab::base::TRIPLE, [subject, predicate, object])
    }

    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn arguments(&self) -> &ArgumentList {
        &self.arguments
    }

    pub fn into_arguments(self) -> ArgumentList {
        self.arguments
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }

    pub fn expander(&self) -> Option<ListExpander> {
        self.arguments.expander()
    }

    /// Whether this is an `ottr:Triple` instance.
    pub fn is_triple(&self) -> bool {
        self.iri == vocab::base::TRIPLE
    }

    /// The predicate of a triple instance, if this is one.
    pub fn triple_predicate(&self) -> Option<&Term> {
        if self.is_triple() {
            self.arguments.term(1)
        } else {
            None
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arguments.expander() {
            Some(expander) => write!(
                f,
                "{} | {}{}",
                expander,
                vocab::compact(&self.iri),
                ArgumentList::new(self.arguments.iter().cloned().collect())
            ),
            None => write!(f, "{}{}", vocab::compact(&self.iri), self.arguments),
        }
    }
}
