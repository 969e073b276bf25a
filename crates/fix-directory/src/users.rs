//! User directory: profile documents keyed by subject ID.

use std::sync::Arc;

use chrono::Utc;
use fix_core::entities::{User, UserKind};
use fix_core::enums::Role;
use fix_core::errors::CoreError;
use fix_core::legacy::UserDocument;
use fix_core::repository::UserRepository;

use crate::error::DirectoryError;
use crate::validate::required;

#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Store a user profile. Name and area are trimmed.
    ///
    /// # Errors
    ///
    /// Validation for a blank ID or name or a common user with a blank area;
    /// backend failures from the store.
    pub async fn create(&self, user: User) -> Result<User, DirectoryError> {
        let kind = match user.kind {
            UserKind::Common { area } => UserKind::Common {
                area: required("area", &area)?,
            },
            other => other,
        };
        let user = User {
            id: required("user id", &user.id)?,
            name: required("name", &user.name)?,
            kind,
            created_at: user.created_at,
        };
        self.users.put_user(&user).await?;
        tracing::info!(id = %user.id, role = %user.role(), "user stored");
        Ok(user)
    }

    /// # Errors
    ///
    /// `NotFound` when no profile exists for `id`.
    pub async fn get(&self, id: &str) -> Result<User, DirectoryError> {
        let id = required("user id", id)?;
        Ok(self.users.get_user(&id).await?)
    }

    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DirectoryError> {
        let users = self.users.find_users_by_role(role).await?;
        tracing::debug!(%role, count = users.len(), "users by role");
        Ok(users)
    }

    /// Technician profile for `code`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user does not exist, Validation when it is not a
    /// technician.
    pub async fn technician(&self, code: &str) -> Result<User, DirectoryError> {
        let user = self.get(code).await?;
        if user.role() != Role::Technician {
            return Err(CoreError::Validation(format!(
                "user '{}' is not a technician",
                user.id
            ))
            .into());
        }
        Ok(user)
    }

    /// Display name of the technician identified by `code`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::technician`].
    pub async fn technician_name(&self, code: &str) -> Result<String, DirectoryError> {
        Ok(self.technician(code).await?.name)
    }

    /// Users who can report incidents.
    ///
    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn common_reporters(&self) -> Result<Vec<User>, DirectoryError> {
        self.find_by_role(Role::Common).await
    }

    /// Upsert documents from the original `usuario` collection, keeping their IDs.
    ///
    /// Every document is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Validation when any document is malformed; backend failures from the store.
    pub async fn import(&self, docs: Vec<UserDocument>) -> Result<usize, DirectoryError> {
        let now = Utc::now();
        let users = docs
            .into_iter()
            .map(|doc| doc.into_user(now))
            .collect::<Result<Vec<_>, _>>()?;
        for user in &users {
            self.users.put_user(user).await?;
        }
        tracing::info!(count = users.len(), "users imported");
        Ok(users.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryStore;

    fn directory() -> UserDirectory {
        UserDirectory::new(Arc::new(MemoryStore::new()))
    }

    fn user(id: &str, name: &str, kind: UserKind) -> User {
        User {
            id: id.into(),
            name: name.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_trims_and_get_returns_it() {
        let users = directory();
        let stored = users
            .create(user(
                "usr-1",
                "  Ana ",
                UserKind::Common {
                    area: " Finance".into(),
                },
            ))
            .await
            .unwrap();
        assert_eq!(stored.name, "Ana");
        assert_eq!(stored.area(), Some("Finance"));
        assert_eq!(users.get("usr-1").await.unwrap(), stored);
    }

    #[tokio::test]
    async fn common_user_needs_area() {
        let users = directory();
        let err = users
            .create(user(
                "usr-1",
                "Ana",
                UserKind::Common { area: "  ".into() },
            ))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "area must not be blank");
    }

    #[tokio::test]
    async fn technician_name_checks_role() {
        let users = directory();
        users
            .create(user("T1", "Bruno", UserKind::Technician))
            .await
            .unwrap();
        users
            .create(user("C1", "Marta", UserKind::Chief))
            .await
            .unwrap();

        assert_eq!(users.technician_name("T1").await.unwrap(), "Bruno");
        assert!(matches!(
            users.technician_name("C1").await,
            Err(DirectoryError::Core(CoreError::Validation(_)))
        ));
        assert!(users.technician_name("nobody").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn common_reporters_only_lists_common_users() {
        let users = directory();
        users
            .create(user("T1", "Bruno", UserKind::Technician))
            .await
            .unwrap();
        users
            .create(user(
                "U2",
                "Luis",
                UserKind::Common { area: "IT".into() },
            ))
            .await
            .unwrap();
        users
            .create(user(
                "U1",
                "Ana",
                UserKind::Common {
                    area: "Finance".into(),
                },
            ))
            .await
            .unwrap();

        let names: Vec<String> = users
            .common_reporters()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Luis"]);
    }

    #[tokio::test]
    async fn import_rejects_batch_with_invalid_document() {
        let users = directory();
        let docs = vec![
            UserDocument {
                id_usuario: "U1".into(),
                nombre: "Ana".into(),
                tipo: "comun".into(),
                area: Some("Finance".into()),
            },
            UserDocument {
                id_usuario: "U2".into(),
                nombre: "Luis".into(),
                tipo: "comun".into(),
                area: None,
            },
        ];
        assert!(users.import(docs).await.is_err());
        assert!(users.get("U1").await.unwrap_err().is_not_found());
    }
}
