//! Core data model for OTTR templates.
//!
//! This crate provides the value types shared by the store, the expander and
//! the query engine:
//!
//! - [`Term`] and [`Type`]: terms and the subtype lattice
//! - [`Parameter`], [`Argument`], [`Instance`], [`Signature`], [`Template`]
//! - [`Substitution`] and the unification functions
//! - [`Message`] / [`Messages`]: user-facing diagnostics
//!
//! All types are immutable values with structural equality; nothing here
//! performs I/O.

pub mod argument;
pub mod error;
pub mod instance;
pub mod message;
pub mod parameter;
pub mod signature;
pub mod substitution;
pub mod term;
pub mod types;
pub mod unification;
pub mod vocab;

pub use argument::{Argument, ArgumentList, ExpansionStep, ListExpander};
pub use error::{InvariantViolation, SubstitutionError, TypeError};
pub use instance::Instance;
pub use message::{Message, Messages, Severity};
pub use parameter::{Parameter, ParameterFlags, ParameterList};
pub use signature::{Declaration, Signature, Template, base_templates};
pub use substitution::Substitution;
pub use term::{Literal, Term, Variable};
pub use types::{Type, TypeRegistry};
pub use unification::{
    SEARCH_LIMIT, unify_arguments, unify_bodies, unify_term_lists, unify_term_lists_unordered,
    unify_terms, unify_terms_with,
};
