//! Process-local identity provider.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::hashing::SecretHasher;
use crate::{IdentityProvider, new_subject_id, normalize_email};

struct Credential {
    subject_id: String,
    secret_hash: String,
}

/// Keeps credentials in memory. Test double for the identity boundary.
pub struct MemoryIdentityProvider {
    hasher: SecretHasher,
    credentials: RwLock<HashMap<String, Credential>>,
}

impl MemoryIdentityProvider {
    #[must_use]
    pub fn new(hasher: SecretHasher) -> Self {
        Self {
            hasher,
            credentials: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<String, AuthError> {
        let key = normalize_email(email);
        let credentials = self.credentials.read().await;
        let credential = credentials.get(&key).ok_or(AuthError::InvalidUser)?;
        if self.hasher.verify(secret, &credential.secret_hash)? {
            Ok(credential.subject_id.clone())
        } else {
            Err(AuthError::InvalidCredential)
        }
    }

    async fn register(&self, email: &str, secret: &str) -> Result<String, AuthError> {
        let key = normalize_email(email);
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(&key) {
            return Err(AuthError::EmailInUse);
        }
        let subject_id = new_subject_id()?;
        credentials.insert(
            key,
            Credential {
                subject_id: subject_id.clone(),
                secret_hash: self.hasher.hash(secret)?,
            },
        );
        tracing::debug!(%subject_id, "registered in-memory credential");
        Ok(subject_id)
    }
}
