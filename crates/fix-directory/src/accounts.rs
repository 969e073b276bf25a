//! Registration and login over the identity provider and the user directory.

use std::sync::Arc;

use chrono::Utc;
use fix_auth::policy::{check_email, check_password};
use fix_auth::{IdentityProvider, normalize_email};
use fix_config::AuthConfig;
use fix_core::entities::{User, UserKind};
use fix_core::enums::Role;
use fix_core::errors::CoreError;
use fix_core::identity::Session;

use crate::error::DirectoryError;
use crate::users::UserDirectory;
use crate::validate::required;

/// Registration form.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    /// Required for common users, rejected for every other role.
    pub area: Option<String>,
}

pub struct Accounts {
    identity: Arc<dyn IdentityProvider>,
    users: UserDirectory,
    min_password_len: usize,
}

impl Accounts {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, users: UserDirectory, config: &AuthConfig) -> Self {
        Self {
            identity,
            users,
            min_password_len: config.min_password_len,
        }
    }

    /// Create a credential and the matching user profile.
    ///
    /// An area given for a chief or technician is dropped.
    ///
    /// # Errors
    ///
    /// Validation for blank fields or a common user without an area;
    /// `InvalidEmail`, `WeakPassword`, or `EmailInUse` from the credential
    /// checks.
    pub async fn register(&self, account: NewAccount) -> Result<User, DirectoryError> {
        let email = required("email", &account.email)?;
        let name = required("name", &account.name)?;
        if account.password.trim().is_empty() {
            return Err(CoreError::Validation("password must not be blank".into()).into());
        }
        check_email(&email)?;
        check_password(&account.password, self.min_password_len)?;
        let kind = user_kind(account.role, account.area.as_deref())?;

        let subject_id = self.identity.register(&email, &account.password).await?;
        let user = User {
            id: subject_id,
            name,
            kind,
            created_at: Utc::now(),
        };
        match self.users.create(user).await {
            Ok(user) => {
                tracing::info!(id = %user.id, role = %user.role(), "account registered");
                Ok(user)
            }
            Err(error) => {
                tracing::warn!(%email, %error, "credential created but profile write failed");
                Err(error)
            }
        }
    }

    /// Authenticate and load the caller's profile.
    ///
    /// A credential without a profile document still logs in, with
    /// `profile = None`.
    ///
    /// # Errors
    ///
    /// Validation for blank fields, `InvalidEmail` for a malformed address,
    /// `InvalidUser` / `InvalidCredential` from the identity provider.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DirectoryError> {
        let email = required("email", email)?;
        if password.trim().is_empty() {
            return Err(CoreError::Validation("password must not be blank".into()).into());
        }
        check_email(&email)?;

        let subject_id = self.identity.authenticate(&email, password).await?;
        let profile = match self.users.get(&subject_id).await {
            Ok(user) => Some(user),
            Err(error) if error.is_not_found() => {
                tracing::warn!(%subject_id, "authenticated subject has no profile");
                None
            }
            Err(error) => return Err(error),
        };
        tracing::info!(%subject_id, "login succeeded");
        Ok(Session {
            subject_id,
            email: normalize_email(&email),
            profile,
        })
    }
}

fn user_kind(role: Role, area: Option<&str>) -> Result<UserKind, CoreError> {
    let area = area.map(str::trim).filter(|a| !a.is_empty());
    match (role, area) {
        (Role::Common, Some(area)) => Ok(UserKind::Common { area: area.into() }),
        (Role::Common, None) => Err(CoreError::Validation(
            "common users must belong to an area".into(),
        )),
        // Only common users carry an area; any other role drops it.
        (Role::Chief, _) => Ok(UserKind::Chief),
        (Role::Technician, _) => Ok(UserKind::Technician),
    }
}

#[cfg(test)]
mod tests {
    use fix_auth::{AuthError, MemoryIdentityProvider, SecretHasher};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryStore;

    struct Fixture {
        store: Arc<MemoryStore>,
        accounts: Accounts,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let identity = Arc::new(MemoryIdentityProvider::new(SecretHasher::fast()));
        let accounts = Accounts::new(
            identity,
            UserDirectory::new(store.clone()),
            &AuthConfig::default(),
        );
        Fixture { store, accounts }
    }

    fn ana() -> NewAccount {
        NewAccount {
            email: "ana@example.com".into(),
            password: "secret1".into(),
            name: "Ana".into(),
            role: Role::Common,
            area: Some("Finance".into()),
        }
    }

    #[tokio::test]
    async fn register_then_login_loads_profile() {
        let fx = fixture();
        let user = fx.accounts.register(ana()).await.unwrap();
        assert_eq!(user.area(), Some("Finance"));

        let session = fx.accounts.login("Ana@Example.com", "secret1").await.unwrap();
        assert_eq!(session.subject_id, user.id);
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(session.profile, Some(user));
    }

    #[tokio::test]
    async fn register_applies_credential_policy() {
        let fx = fixture();

        let mut bad_email = ana();
        bad_email.email = "ana.example.com".into();
        assert!(matches!(
            fx.accounts.register(bad_email).await,
            Err(DirectoryError::Auth(AuthError::InvalidEmail))
        ));

        let mut short = ana();
        short.password = "12345".into();
        assert!(matches!(
            fx.accounts.register(short).await,
            Err(DirectoryError::Auth(AuthError::WeakPassword { min_len: 6 }))
        ));

        fx.accounts.register(ana()).await.unwrap();
        assert!(matches!(
            fx.accounts.register(ana()).await,
            Err(DirectoryError::Auth(AuthError::EmailInUse))
        ));
    }

    #[tokio::test]
    async fn area_is_kept_only_for_common_users() {
        let fx = fixture();
        let mut no_area = ana();
        no_area.area = Some("   ".into());
        assert!(matches!(
            fx.accounts.register(no_area).await,
            Err(DirectoryError::Core(CoreError::Validation(_)))
        ));

        let mut tech_with_area = ana();
        tech_with_area.email = "bruno@example.com".into();
        tech_with_area.role = Role::Technician;
        let technician = fx.accounts.register(tech_with_area).await.unwrap();
        assert_eq!(technician.role(), Role::Technician);
        assert_eq!(technician.area(), None);
    }

    #[tokio::test]
    async fn login_errors_are_distinguished() {
        let fx = fixture();
        fx.accounts.register(ana()).await.unwrap();

        let err = fx
            .accounts
            .login("luis@example.com", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "no account is registered with this email");

        let err = fx
            .accounts
            .login("ana@example.com", "wrong-one")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "wrong password or invalid email");

        assert!(matches!(
            fx.accounts.login(" ", "secret1").await,
            Err(DirectoryError::Core(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn login_without_profile_still_succeeds() {
        let fx = fixture();
        fx.store.set_offline(true);
        // Credential is created, profile write fails.
        assert!(fx.accounts.register(ana()).await.is_err());
        fx.store.set_offline(false);

        let session = fx.accounts.login("ana@example.com", "secret1").await.unwrap();
        assert_eq!(session.profile, None);
    }
}
