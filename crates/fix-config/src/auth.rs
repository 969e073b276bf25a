//! Local identity provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_min_password_len() -> usize {
    6
}

/// Argon2 default memory cost.
const fn default_hash_memory_kib() -> u32 {
    19_456
}

const fn default_hash_iterations() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Registration rejects shorter passwords.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Argon2id memory cost in KiB.
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,

    /// Argon2id time cost.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

impl AuthConfig {
    /// Reject values argon2 would refuse at hashing time.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hash_memory_kib < 8 {
            return Err(ConfigError::InvalidValue {
                field: "auth.hash_memory_kib".into(),
                reason: format!("must be at least 8, got {}", self.hash_memory_kib),
            });
        }
        if self.hash_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.hash_iterations".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.min_password_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.min_password_len".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AuthConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = AuthConfig {
            hash_iterations: 0,
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
