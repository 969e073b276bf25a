//! Cross-cutting error types for FixPoint.
//!
//! This module defines errors that can originate from any crate in the system.
//! Store-specific errors (e.g., `DatabaseError`) are defined in their respective
//! crates and converted into `CoreError` at the repository boundary. The
//! service-level `DirectoryError` in `fix-directory` adds authentication failures.

use thiserror::Error;

/// Errors that can be raised by any FixPoint crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A required field was blank or malformed. Raised before touching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing store rejected or failed the call (network, permission, I/O).
    #[error("Backend error: {0}")]
    Backend(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}
