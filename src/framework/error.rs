//! # Console Errors
//!
//! Two layers of failure live here:
//!
//! - [`StoreError`]: what the document store boundary can report (channel closed, missing
//!   document, backend failure).
//! - [`ConsoleError`]: the taxonomy every screen operation returns. Store failures are folded
//!   into it at the operation boundary so nothing escapes as an uncaught fault.

use crate::framework::document::DocumentId;

/// Errors raised by a [`DocumentStore`](crate::framework::DocumentStore) implementation.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("No document {id} in {collection}")]
    MissingDocument { collection: String, id: DocumentId },
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors surfaced to the user by screen and adapter operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConsoleError {
    /// A required field is missing or a value is out of range. Raised before any write.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The application id has no matching document at mutation time. No write was made.
    #[error("No {label} found: {id}")]
    NotFound { label: &'static str, id: String },

    /// A derived application id is already taken.
    #[error("{label} already exists: {id}")]
    Conflict { label: &'static str, id: String },

    /// A stored document could not be decoded into its entity.
    #[error("Malformed {label} document {id}: {reason}")]
    Decode {
        label: &'static str,
        id: DocumentId,
        reason: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The screen was deactivated while the operation was in flight; its result was discarded.
    #[error("Screen is no longer active")]
    Stale,
}

impl ConsoleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound { .. })
    }
}
