//! Service-level error type.

use fix_auth::AuthError;
use fix_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DirectoryError {
    /// Message shown to the user who triggered the operation.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Core(CoreError::Validation(reason)) => reason.clone(),
            Self::Core(CoreError::NotFound { entity_type, id }) => {
                format!("{entity_type} '{id}' was not found")
            }
            Self::Core(CoreError::Backend(reason)) => {
                format!("the store could not complete the request: {reason}")
            }
            Self::Core(CoreError::Other(error)) => format!("unexpected error: {error}"),
            Self::Auth(error) => error.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}
