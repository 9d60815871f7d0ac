//! Expansion and refactoring errors.

use thiserror::Error;

use ottr_core::{Message, SubstitutionError, Type, vocab};
use ottr_store::StoreError;

/// A failure while expanding one instance.
///
/// Expansion does not stop on these; each becomes an `Err` item of the
/// output stream and the remaining instances are still expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    /// The callee has no definition, or is only a signature at top level.
    #[error("missing definition of template {}", vocab::compact(iri))]
    MissingDefinition { iri: String },

    /// A marked argument is still a variable or blank node.
    #[error("cannot expand lists of {instance}: a marked argument is not a list")]
    UnresolvedListExpander { instance: String },

    #[error("wrong number of arguments to {}: expected {expected}, got {got}", vocab::compact(iri))]
    ArityMismatch {
        iri: String,
        expected: usize,
        got: usize,
    },

    #[error(
        "argument {argument} at position {position} of {} has type {found}, incompatible with {expected}",
        vocab::compact(iri)
    )]
    IncompatibleType {
        iri: String,
        position: usize,
        argument: String,
        found: Type,
        expected: Type,
    },

    #[error(
        "blank node {argument} given for non-blank parameter at position {position} of {}",
        vocab::compact(iri)
    )]
    BlankForNonBlank {
        iri: String,
        position: usize,
        argument: String,
    },

    /// A zipMax step where some marked list had no element left.
    #[error("zipMax step {step} of {instance} is out of elements at positions {positions:?}")]
    ZipMaxExhausted {
        instance: String,
        step: usize,
        positions: Vec<usize>,
    },

    #[error("expansion stopped after {limit} steps")]
    IterationLimit { limit: usize },

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}

impl From<&ExpansionError> for Message {
    fn from(err: &ExpansionError) -> Self {
        Message::error(err.to_string())
    }
}

/// Errors from [`refactor`](crate::refactor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefactorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot refactor {iri} using itself")]
    SameTemplate { iri: String },

    #[error("body of {to_use} does not unify into the body of {to_change}")]
    NoUnifier { to_use: String, to_change: String },

    /// The unifier leaves a parameter of the template to use unbound.
    #[error("parameter ?{parameter} of {to_use} is not bound when refactoring {to_change}")]
    UnboundParameter {
        to_use: String,
        to_change: String,
        parameter: String,
    },

    /// A `none` passed to `to_change` would reach a parameter of `to_use`
    /// that drops the call or replaces `none` with a default.
    #[error(
        "parameter ?{parameter} of {to_use} would receive none from ?{argument} of {to_change}, changing its expansion"
    )]
    OptionalMismatch {
        to_use: String,
        to_change: String,
        parameter: String,
        argument: String,
    },

    /// A non-blank parameter of `to_use` would receive a term that may be
    /// blank in `to_change`.
    #[error("non-blank parameter ?{parameter} of {to_use} would receive {argument} from {to_change}")]
    NonBlankMismatch {
        to_use: String,
        to_change: String,
        parameter: String,
        argument: String,
    },

    /// A blank node of the matched instances also occurs in the rest of the
    /// body, so replacing the instances would disconnect it.
    #[error("blank node {blank} of {to_change} is shared outside the matched instances")]
    SharedBlankNode { to_change: String, blank: String },
}

impl From<&RefactorError> for Message {
    fn from(err: &RefactorError) -> Self {
        Message::error(err.to_string())
    }
}
