//! Credential table exposed as a `fix-auth` identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use fix_auth::new_subject_id;
use fix_auth::{AuthError, IdentityProvider, SecretHasher, normalize_email};

use crate::error::DatabaseError;
use crate::helpers::format_datetime;
use crate::service::FixStore;

/// Identity provider backed by the `credentials` table.
pub struct DbIdentityProvider {
    store: Arc<FixStore>,
    hasher: SecretHasher,
}

impl DbIdentityProvider {
    #[must_use]
    pub const fn new(store: Arc<FixStore>, hasher: SecretHasher) -> Self {
        Self { store, hasher }
    }
}

impl FixStore {
    /// Subject ID and secret hash stored for `email`, if any.
    pub async fn get_credential(
        &self,
        email: &str,
    ) -> Result<Option<(String, String)>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT subject_id, secret_hash FROM credentials WHERE email = ?1",
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some((row.get(0)?, row.get(1)?))),
            None => Ok(None),
        }
    }

    /// Insert a credential. Returns `false` when the email is already taken.
    pub async fn insert_credential(
        &self,
        email: &str,
        subject_id: &str,
        secret_hash: &str,
    ) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "INSERT INTO credentials (email, subject_id, secret_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4) ON CONFLICT(email) DO NOTHING",
                libsql::params![email, subject_id, secret_hash, format_datetime(Utc::now())],
            )
            .await?;
        Ok(affected == 1)
    }
}

fn backend(error: DatabaseError) -> AuthError {
    AuthError::Unknown(error.to_string())
}

#[async_trait]
impl IdentityProvider for DbIdentityProvider {
    async fn authenticate(&self, email: &str, secret: &str) -> Result<String, AuthError> {
        let key = normalize_email(email);
        let (subject_id, stored) = self
            .store
            .get_credential(&key)
            .await
            .map_err(backend)?
            .ok_or(AuthError::InvalidUser)?;
        if self.hasher.verify(secret, &stored)? {
            Ok(subject_id)
        } else {
            Err(AuthError::InvalidCredential)
        }
    }

    async fn register(&self, email: &str, secret: &str) -> Result<String, AuthError> {
        let key = normalize_email(email);
        let subject_id = new_subject_id()?;
        let hash = self.hasher.hash(secret)?;
        let inserted = self
            .store
            .insert_credential(&key, &subject_id, &hash)
            .await
            .map_err(backend)?;
        if !inserted {
            return Err(AuthError::EmailInUse);
        }
        tracing::info!(%subject_id, "credential registered");
        Ok(subject_id)
    }
}
