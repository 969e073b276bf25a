//! `fix-core` repository traits over [`FixStore`].

use async_trait::async_trait;
use fix_core::entities::{Incident, NewIncident, User};
use fix_core::enums::{IncidentStatus, Role};
use fix_core::errors::CoreError;
use fix_core::repository::{IncidentChange, IncidentFilter, IncidentRepository, UserRepository};
use tokio::sync::broadcast;

use crate::error::DatabaseError;
use crate::service::FixStore;

/// Convert a store error, turning a missing row into `NotFound` for `id`.
fn lookup(entity_type: &'static str, id: &str) -> impl FnOnce(DatabaseError) -> CoreError {
    let id = id.to_string();
    move |error| match error {
        DatabaseError::NoResult => CoreError::not_found(entity_type, &id),
        other => other.into(),
    }
}

#[async_trait]
impl IncidentRepository for FixStore {
    async fn insert_incident(&self, draft: &NewIncident) -> Result<Incident, CoreError> {
        Ok(self.create_incident(draft).await?)
    }

    async fn get_incident(&self, code: &str) -> Result<Incident, CoreError> {
        Self::get_incident(self, code)
            .await
            .map_err(lookup("incident", code))
    }

    async fn find_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>, CoreError> {
        Ok(self.list_incidents(filter).await?)
    }

    async fn set_technician(
        &self,
        code: &str,
        technician: &str,
        status: Option<IncidentStatus>,
    ) -> Result<(), CoreError> {
        self.assign_technician(code, technician, status)
            .await
            .map_err(lookup("incident", code))
    }

    async fn set_status(&self, code: &str, status: IncidentStatus) -> Result<(), CoreError> {
        self.update_incident_status(code, status)
            .await
            .map_err(lookup("incident", code))
    }

    async fn put_incident(&self, incident: &Incident) -> Result<(), CoreError> {
        Ok(self.upsert_incident(incident).await?)
    }

    fn changes(&self) -> broadcast::Receiver<IncidentChange> {
        self.subscribe()
    }
}

#[async_trait]
impl UserRepository for FixStore {
    async fn put_user(&self, user: &User) -> Result<(), CoreError> {
        Ok(self.upsert_user(user).await?)
    }

    async fn get_user(&self, id: &str) -> Result<User, CoreError> {
        Self::get_user(self, id).await.map_err(lookup("user", id))
    }

    async fn find_users_by_role(&self, role: Role) -> Result<Vec<User>, CoreError> {
        Ok(self.list_users_by_role(role).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::helpers::{draft, test_store};

    #[tokio::test]
    async fn missing_incident_maps_to_not_found() {
        let store: Arc<dyn IncidentRepository> = Arc::new(test_store().await);
        let err = store.get_incident("inc-missing").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound { ref entity_type, ref id } if entity_type == "incident" && id == "inc-missing"
        ));

        let err = store
            .set_status("inc-missing", IncidentStatus::Solved)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn missing_user_maps_to_not_found() {
        let store: Arc<dyn UserRepository> = Arc::new(test_store().await);
        let err = store.get_user("usr-missing").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn trait_object_roundtrip() {
        let store: Arc<dyn IncidentRepository> = Arc::new(test_store().await);
        let created = store.insert_incident(&draft("Ana", "Finance")).await.unwrap();
        let fetched = store.get_incident(&created.code).await.unwrap();
        assert_eq!(fetched, created);
    }
}
