//! Top-level error type.
//!
//! Each crate of the workspace reports its own error enum; [`OttrError`]
//! wraps them so callers driving a whole run can use a single `Result`.

use thiserror::Error;

use ottr_core::{Message, SubstitutionError, TypeError};
use ottr_expander::{ExpansionError, RefactorError};
use ottr_store::{ReaderError, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OttrError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reader(#[from] ReaderError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Refactor(#[from] RefactorError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),
}

/// Result alias for [`OttrError`].
pub type OttrResult<T> = Result<T, OttrError>;

impl From<&OttrError> for Message {
    fn from(err: &OttrError) -> Self {
        Message::error(err.to_string())
    }
}
