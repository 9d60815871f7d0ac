//! Error types for the OTTR model.
//!
//! ## Error Hierarchy
//!
//! ```text
//! TypeError          - type registry misuse
//! SubstitutionError  - argument/parameter lists that cannot be paired
//! InvariantViolation - programmer errors; never reported as user diagnostics
//! ```
//!
//! User-facing problems are turned into [`Message`](crate::Message)s with
//! `From` conversions so callers can aggregate them across a whole run.

use thiserror::Error;

use crate::message::Message;

// ============================================================================
// Type Errors
// ============================================================================

/// Errors raised while building a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The requested supertype has not been registered.
    #[error("cannot register type {iri}: unknown supertype {parent}")]
    UnknownSupertype { iri: String, parent: String },

    /// The type is already registered below a different supertype.
    ///
    /// The basic types form a tree, so a type has exactly one supertype.
    #[error("type {iri} already has supertype {existing}, cannot add {requested}")]
    ConflictingSupertype {
        iri: String,
        existing: String,
        requested: String,
    },

    /// The top and bottom types are fixed.
    #[error("type {iri} is built in and cannot be redefined")]
    BuiltIn { iri: String },
}

// ============================================================================
// Substitution Errors
// ============================================================================

/// Errors raised when pairing arguments with parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstitutionError {
    /// Argument and parameter lists differ in length.
    #[error("cannot make substitution: expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },
}

impl From<&SubstitutionError> for Message {
    fn from(err: &SubstitutionError) -> Self {
        Message::error(err.to_string())
    }
}

// ============================================================================
// Invariant Violations
// ============================================================================

/// A broken internal invariant.
///
/// These indicate defects in calling code (for instance reading a query
/// variable that was never bound) and abort evaluation instead of being
/// collected as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A variable was read before anything bound it.
    #[error("invariant violated: variable {variable} is not bound")]
    UnboundVariable { variable: String },

    /// A bound value had a different kind than the caller required.
    #[error("invariant violated: variable {variable} holds {found}, expected {expected}")]
    WrongValueKind {
        variable: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Anything else that can only happen through a bug.
    #[error("invariant violated: {0}")]
    Other(String),
}

impl InvariantViolation {
    /// Abort with this violation as the panic payload message.
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Severity;

    #[test]
    fn substitution_error_becomes_error_message() {
        let err = SubstitutionError::ArityMismatch {
            expected: 3,
            got: 2,
        };
        let msg = Message::from(&err);
        assert_eq!(msg.severity, Severity::Error);
        assert!(msg.text.contains("expected 3"));
    }

    #[test]
    #[should_panic(expected = "variable T is not bound")]
    fn invariant_violation_raises() {
        InvariantViolation::UnboundVariable {
            variable: "T".to_string(),
        }
        .raise();
    }
}
