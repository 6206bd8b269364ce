//! Error types for the layout engine

use thiserror::Error;

use crate::person::PersonId;

/// Main error type for lineage operations
#[derive(Error, Debug)]
pub enum LineageError {
    /// The person list is not well formed (not a list, missing id, duplicate id)
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// The tree source failed to produce a person list
    #[error("Tree source '{source_name}' failed: {message}")]
    Source {
        /// Name of the failing source
        source_name: String,
        /// Underlying failure
        message: String,
    },

    /// No handler is registered for the requested view
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// The session requires a signed-in user and has none
    #[error("Sign in to view the family tree")]
    NotSignedIn,

    /// A person view was requested for an id absent from the snapshot
    #[error("Person {0} not found")]
    PersonNotFound(PersonId),
}

impl LineageError {
    /// Build an [`LineageError::InvalidInput`] from any message.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        LineageError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build a [`LineageError::Source`] error.
    pub fn source_failed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        LineageError::Source {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for lineage operations
pub type Result<T> = std::result::Result<T, LineageError>;
