//! Argon2id secret hashing for the local identity providers.
//!
//! Hashes are PHC strings, so verification reads the cost parameters from the
//! stored hash and keeps working after the configured costs change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use fix_config::AuthConfig;

use crate::error::AuthError;

#[derive(Clone)]
pub struct SecretHasher {
    argon: Argon2<'static>,
}

impl SecretHasher {
    /// # Errors
    ///
    /// Returns `AuthError::Unknown` if argon2 rejects the cost parameters.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| AuthError::Unknown(format!("invalid argon2 params: {e}")))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// # Errors
    ///
    /// Returns `AuthError::Unknown` if argon2 rejects the cost parameters.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(config.hash_memory_kib, config.hash_iterations)
    }

    /// Cheapest parameters argon2 accepts. For tests only.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            argon: Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
                    .unwrap_or_default(),
            ),
        }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Unknown` if hashing fails.
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Unknown(format!("hashing failed: {e}")))
    }

    /// Check `secret` against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unknown` if the stored hash cannot be parsed.
    pub fn verify(&self, secret: &str, stored: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AuthError::Unknown(format!("corrupt stored hash: {e}")))?;
        match self.argon.verify_password(secret.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Unknown(format!("verification failed: {e}"))),
        }
    }
}
