//! Store and reader errors.

use thiserror::Error;

use ottr_core::Message;

/// Errors from looking things up in a [`TemplateStore`](crate::TemplateStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No definition is stored for the IRI. It may be unknown, a plain
    /// signature or a base template.
    #[error("missing template definition for {iri}")]
    MissingTemplate { iri: String },

    /// Nothing at all is known about the IRI.
    #[error("missing signature for {iri}")]
    MissingSignature { iri: String },
}

impl From<&StoreError> for Message {
    fn from(err: &StoreError) -> Self {
        Message::error(err.to_string())
    }
}

/// Errors reported by a [`TemplateReader`](crate::TemplateReader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// The reader does not know where to find the template.
    #[error("no source found for template {iri}")]
    NotFound { iri: String },

    /// The source exists but could not be turned into a template.
    #[error("malformed template {iri}: {reason}")]
    Malformed { iri: String, reason: String },

    /// Anything else, typically I/O.
    #[error("reader failed: {0}")]
    Other(String),
}

impl From<&ReaderError> for Message {
    fn from(err: &ReaderError) -> Self {
        Message::error(err.to_string())
    }
}
