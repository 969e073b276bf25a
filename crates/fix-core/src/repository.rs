//! Repository traits implemented by every FixPoint backing store.
//!
//! Services receive these as `Arc<dyn ...>` at construction, so the libSQL store
//! and the in-memory test double are interchangeable. Every mutation touches a
//! single document and is atomic at the store. A committed mutation is announced
//! on the store's change feed.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::entities::{Incident, NewIncident, User};
use crate::enums::{IncidentStatus, Role};
use crate::errors::CoreError;

/// Buffered change events per subscriber before it starts lagging.
pub const CHANGE_FEED_CAPACITY: usize = 64;

/// A committed change to the incident set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentChange {
    Created { code: String },
    TechnicianSet { code: String, technician: String },
    StatusSet { code: String, status: IncidentStatus },
    Imported { code: String },
    /// Another process committed to the shared store.
    External,
}

/// Equality filters over incidents. `None` fields match everything.
///
/// `technician: Some(String::new())` selects the assignment queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    pub technician: Option<String>,
    pub status: Option<IncidentStatus>,
    pub reporter_name: Option<String>,
}

impl IncidentFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn unassigned() -> Self {
        Self {
            technician: Some(String::new()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn assigned_to(technician: impl Into<String>) -> Self {
        Self {
            technician: Some(technician.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn reported_by(reporter_name: impl Into<String>) -> Self {
        Self {
            reporter_name: Some(reporter_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: IncidentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Exact-string match on every set field.
    #[must_use]
    pub fn matches(&self, incident: &Incident) -> bool {
        self.technician
            .as_ref()
            .is_none_or(|t| *t == incident.assigned_technician)
            && self.status.is_none_or(|s| s == incident.status)
            && self
                .reporter_name
                .as_ref()
                .is_none_or(|n| *n == incident.reporter_name)
    }
}

/// Store operations over the incident collection.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Allocate a fresh code and store the incident as unattended and unassigned.
    async fn insert_incident(&self, draft: &NewIncident) -> Result<Incident, CoreError>;

    async fn get_incident(&self, code: &str) -> Result<Incident, CoreError>;

    /// Incidents matching `filter`, ordered by creation time then code.
    async fn find_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>, CoreError>;

    /// Write the technician code, and the status too when `status` is set,
    /// in one document update.
    async fn set_technician(
        &self,
        code: &str,
        technician: &str,
        status: Option<IncidentStatus>,
    ) -> Result<(), CoreError>;

    async fn set_status(&self, code: &str, status: IncidentStatus) -> Result<(), CoreError>;

    /// Create or overwrite an incident under its existing code.
    async fn put_incident(&self, incident: &Incident) -> Result<(), CoreError>;

    /// Subscribe to committed changes.
    fn changes(&self) -> broadcast::Receiver<IncidentChange>;
}

/// Store operations over the user collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create or overwrite the user document keyed by `user.id`.
    async fn put_user(&self, user: &User) -> Result<(), CoreError>;

    async fn get_user(&self, id: &str) -> Result<User, CoreError>;

    /// Users with the given role, ordered by name then ID.
    async fn find_users_by_role(&self, role: Role) -> Result<Vec<User>, CoreError>;
}
