//! In-process store implementing both repository traits.
//!
//! Behaves like the libSQL store (ordering, change feed, not-found errors) and
//! can be switched offline to exercise backend failures.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use fix_core::entities::{Incident, NewIncident, User};
use fix_core::enums::{IncidentStatus, Role};
use fix_core::errors::CoreError;
use fix_core::ids::{PREFIX_INCIDENT, format_id};
use fix_core::repository::{
    CHANGE_FEED_CAPACITY, IncidentChange, IncidentFilter, IncidentRepository, UserRepository,
};
use tokio::sync::{RwLock, broadcast};

pub struct MemoryStore {
    incidents: RwLock<BTreeMap<String, Incident>>,
    users: RwLock<BTreeMap<String, User>>,
    changes: broadcast::Sender<IncidentChange>,
    next_code: AtomicU32,
    offline: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            incidents: RwLock::new(BTreeMap::new()),
            users: RwLock::new(BTreeMap::new()),
            changes,
            next_code: AtomicU32::new(1),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every call fails with `CoreError::Backend`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn online(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::Backend("store is unreachable".into()));
        }
        Ok(())
    }

    fn publish(&self, change: IncidentChange) {
        let _ = self.changes.send(change);
    }

    async fn update<F>(&self, code: &str, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Incident) + Send,
    {
        self.online()?;
        let mut incidents = self.incidents.write().await;
        let incident = incidents
            .get_mut(code)
            .ok_or_else(|| CoreError::not_found("incident", code))?;
        apply(incident);
        incident.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl IncidentRepository for MemoryStore {
    async fn insert_incident(&self, draft: &NewIncident) -> Result<Incident, CoreError> {
        self.online()?;
        let seq = self.next_code.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let incident = Incident {
            code: format_id(PREFIX_INCIDENT, seq.to_be_bytes()),
            reporter_name: draft.reporter_name.clone(),
            reporter_area: draft.reporter_area.clone(),
            description: draft.description.clone(),
            equipment_name: draft.equipment_name.clone(),
            assigned_technician: String::new(),
            status: IncidentStatus::Unattended,
            created_at: now,
            updated_at: now,
        };
        self.incidents
            .write()
            .await
            .insert(incident.code.clone(), incident.clone());
        self.publish(IncidentChange::Created {
            code: incident.code.clone(),
        });
        Ok(incident)
    }

    async fn get_incident(&self, code: &str) -> Result<Incident, CoreError> {
        self.online()?;
        self.incidents
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| CoreError::not_found("incident", code))
    }

    async fn find_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>, CoreError> {
        self.online()?;
        let mut found: Vec<Incident> = self
            .incidents
            .read()
            .await
            .values()
            .filter(|incident| filter.matches(incident))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(found)
    }

    async fn set_technician(
        &self,
        code: &str,
        technician: &str,
        status: Option<IncidentStatus>,
    ) -> Result<(), CoreError> {
        self.update(code, |incident| {
            incident.assigned_technician = technician.to_string();
            if let Some(status) = status {
                incident.status = status;
            }
        })
        .await?;
        self.publish(IncidentChange::TechnicianSet {
            code: code.to_string(),
            technician: technician.to_string(),
        });
        if let Some(status) = status {
            self.publish(IncidentChange::StatusSet {
                code: code.to_string(),
                status,
            });
        }
        Ok(())
    }

    async fn set_status(&self, code: &str, status: IncidentStatus) -> Result<(), CoreError> {
        self.update(code, |incident| incident.status = status)
            .await?;
        self.publish(IncidentChange::StatusSet {
            code: code.to_string(),
            status,
        });
        Ok(())
    }

    async fn put_incident(&self, incident: &Incident) -> Result<(), CoreError> {
        self.online()?;
        self.incidents
            .write()
            .await
            .insert(incident.code.clone(), incident.clone());
        self.publish(IncidentChange::Imported {
            code: incident.code.clone(),
        });
        Ok(())
    }

    fn changes(&self) -> broadcast::Receiver<IncidentChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn put_user(&self, user: &User) -> Result<(), CoreError> {
        self.online()?;
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<User, CoreError> {
        self.online()?;
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("user", id))
    }

    async fn find_users_by_role(&self, role: Role) -> Result<Vec<User>, CoreError> {
        self.online()?;
        let mut users: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }
}
