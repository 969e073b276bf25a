//! # fix-auth
//!
//! Identity Resolver boundary for FixPoint.
//!
//! An [`IdentityProvider`] turns an email + secret pair into a stable subject ID.
//! User profiles are keyed by that ID in the user directory. This crate also
//! owns the credential policy applied at registration (email format, password
//! length) and argon2id secret hashing shared by the local providers.

pub mod error;
pub mod hashing;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod policy;

use async_trait::async_trait;
use fix_core::ids::{PREFIX_SUBJECT, format_id};

pub use error::AuthError;
pub use hashing::SecretHasher;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryIdentityProvider;

/// Authenticates credential pairs and issues subject IDs.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify `email`/`secret` and return the subject ID.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidUser` when no account exists for the email,
    /// `AuthError::InvalidCredential` when the secret does not match.
    async fn authenticate(&self, email: &str, secret: &str) -> Result<String, AuthError>;

    /// Create a credential and return the newly issued subject ID.
    ///
    /// # Errors
    ///
    /// `AuthError::EmailInUse` when the email already has an account.
    async fn register(&self, email: &str, secret: &str) -> Result<String, AuthError>;
}

/// Issue a fresh random subject ID.
///
/// # Errors
///
/// Returns `AuthError::Unknown` if the OS random source fails.
pub fn new_subject_id() -> Result<String, AuthError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::Unknown(format!("random source unavailable: {e}")))?;
    Ok(format_id(PREFIX_SUBJECT, bytes))
}

/// Canonical form of an email used as the credential key.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana.Lopez@Example.COM "), "ana.lopez@example.com");
        assert_eq!(normalize_email("ana@example.com"), "ana@example.com");
    }
}
