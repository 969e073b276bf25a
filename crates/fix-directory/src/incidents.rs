//! Incident directory: the operations behind the submit, assign, resolve, and
//! dashboard views.

use std::sync::Arc;

use chrono::Utc;
use fix_config::WorkflowConfig;
use fix_core::entities::{Incident, NewIncident, UserKind};
use fix_core::enums::IncidentStatus;
use fix_core::errors::CoreError;
use fix_core::legacy::IncidentDocument;
use fix_core::repository::{IncidentFilter, IncidentRepository};
use fix_core::responses::{AreaCounts, StatusCounts};

use crate::error::DirectoryError;
use crate::subscription::Subscription;
use crate::users::UserDirectory;
use crate::validate::required;

/// Placeholder code some legacy clients send before an incident is chosen.
const PLACEHOLDER_CODE: &str = "0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Write `status = assigned` together with the technician code.
    pub mark_assigned_on_assign: bool,
}

impl From<&WorkflowConfig> for DirectoryOptions {
    fn from(config: &WorkflowConfig) -> Self {
        Self {
            mark_assigned_on_assign: config.mark_assigned_on_assign,
        }
    }
}

pub struct IncidentDirectory {
    incidents: Arc<dyn IncidentRepository>,
    users: UserDirectory,
    options: DirectoryOptions,
}

impl IncidentDirectory {
    #[must_use]
    pub const fn new(
        incidents: Arc<dyn IncidentRepository>,
        users: UserDirectory,
        options: DirectoryOptions,
    ) -> Self {
        Self {
            incidents,
            users,
            options,
        }
    }

    /// Report a new incident. It starts unattended and unassigned.
    ///
    /// # Errors
    ///
    /// Validation when any field is blank; backend failures from the store.
    pub async fn submit(&self, draft: &NewIncident) -> Result<Incident, DirectoryError> {
        let draft = NewIncident {
            reporter_name: required("reporter name", &draft.reporter_name)?,
            reporter_area: required("reporter area", &draft.reporter_area)?,
            description: required("description", &draft.description)?,
            equipment_name: required("equipment name", &draft.equipment_name)?,
        };
        let incident = self.incidents.insert_incident(&draft).await?;
        tracing::info!(
            code = %incident.code,
            reporter = %incident.reporter_name,
            area = %incident.reporter_area,
            "incident submitted"
        );
        Ok(incident)
    }

    /// Report an incident on behalf of a common user, copying their name and area.
    ///
    /// # Errors
    ///
    /// Validation for blank fields or a reporter who is not a common user;
    /// `NotFound` when the reporter has no profile.
    pub async fn submit_for(
        &self,
        reporter_id: &str,
        description: &str,
        equipment_name: &str,
    ) -> Result<Incident, DirectoryError> {
        let description = required("description", description)?;
        let equipment_name = required("equipment name", equipment_name)?;
        let reporter = self.users.get(reporter_id).await?;
        let UserKind::Common { area } = reporter.kind else {
            return Err(CoreError::Validation(format!(
                "user '{}' is not a common user and cannot report incidents",
                reporter.id
            ))
            .into());
        };
        self.submit(&NewIncident {
            reporter_name: reporter.name,
            reporter_area: area,
            description,
            equipment_name,
        })
        .await
    }

    /// # Errors
    ///
    /// `NotFound` when no incident has this code.
    pub async fn get(&self, code: &str) -> Result<Incident, DirectoryError> {
        let code = required("incident code", code)?;
        Ok(self.incidents.get_incident(&code).await?)
    }

    /// Incidents awaiting a technician.
    ///
    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn list_unassigned(&self) -> Result<Vec<Incident>, DirectoryError> {
        self.find("unassigned", &IncidentFilter::unassigned()).await
    }

    /// Set the technician on an incident. Reassigning the same technician
    /// leaves the incident unchanged.
    ///
    /// Status is left alone unless `mark_assigned_on_assign` is set, in which
    /// case it becomes `Assigned` in the same update.
    ///
    /// # Errors
    ///
    /// Validation for blank input, the placeholder code, or a user who is not
    /// a technician; `NotFound` for an unknown incident or technician.
    pub async fn assign(&self, code: &str, technician: &str) -> Result<(), DirectoryError> {
        let code = required("incident code", code)?;
        let technician = required("technician code", technician)?;
        if code == PLACEHOLDER_CODE {
            return Err(CoreError::Validation("no incident selected".into()).into());
        }
        self.users.technician(&technician).await?;

        let status = self
            .options
            .mark_assigned_on_assign
            .then_some(IncidentStatus::Assigned);
        self.incidents
            .set_technician(&code, &technician, status)
            .await?;
        tracing::info!(%code, %technician, "technician assigned");
        Ok(())
    }

    /// Pending incidents assigned to `technician`.
    ///
    /// Assigned incidents that are still unattended are not included.
    ///
    /// # Errors
    ///
    /// Validation for a blank technician code; backend failures from the store.
    pub async fn list_assigned_pending(
        &self,
        technician: &str,
    ) -> Result<Vec<Incident>, DirectoryError> {
        let technician = required("technician code", technician)?;
        let filter = IncidentFilter::assigned_to(technician).with_status(IncidentStatus::Pending);
        self.find("assigned pending", &filter).await
    }

    /// Incidents whose reporter name equals `reporter_name` exactly.
    ///
    /// Surrounding whitespace is trimmed first, as it is for every stored name
    /// and code; the comparison itself is case-sensitive.
    ///
    /// # Errors
    ///
    /// Validation for a blank name; backend failures from the store.
    pub async fn list_by_reporter(
        &self,
        reporter_name: &str,
    ) -> Result<Vec<Incident>, DirectoryError> {
        let reporter_name = required("reporter name", reporter_name)?;
        self.find("by reporter", &IncidentFilter::reported_by(reporter_name))
            .await
    }

    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn list_all(&self) -> Result<Vec<Incident>, DirectoryError> {
        self.find("all", &IncidentFilter::all()).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown incident; backend failures from the store.
    pub async fn set_resolved(&self, code: &str) -> Result<(), DirectoryError> {
        self.set_status(code, IncidentStatus::Solved).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown incident; backend failures from the store.
    pub async fn set_pending(&self, code: &str) -> Result<(), DirectoryError> {
        self.set_status(code, IncidentStatus::Pending).await
    }

    /// Incident counts per reporter area.
    ///
    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn aggregate_by_area(&self) -> Result<AreaCounts, DirectoryError> {
        Ok(AreaCounts::from_incidents(&self.list_all().await?))
    }

    /// Incident counts per status.
    ///
    /// # Errors
    ///
    /// Backend failures from the store.
    pub async fn aggregate_by_status(&self) -> Result<StatusCounts, DirectoryError> {
        Ok(StatusCounts::from_incidents(&self.list_all().await?))
    }

    /// Live [`AreaCounts`], recomputed on every change.
    #[must_use]
    pub fn watch_by_area(&self) -> Subscription<AreaCounts> {
        let incidents = Arc::clone(&self.incidents);
        Subscription::spawn(self.incidents.changes(), move || {
            let incidents = Arc::clone(&incidents);
            async move {
                let all = incidents.find_incidents(&IncidentFilter::all()).await?;
                Ok::<_, DirectoryError>(AreaCounts::from_incidents(&all))
            }
        })
    }

    /// Live [`StatusCounts`], recomputed on every change.
    #[must_use]
    pub fn watch_by_status(&self) -> Subscription<StatusCounts> {
        let incidents = Arc::clone(&self.incidents);
        Subscription::spawn(self.incidents.changes(), move || {
            let incidents = Arc::clone(&incidents);
            async move {
                let all = incidents.find_incidents(&IncidentFilter::all()).await?;
                Ok::<_, DirectoryError>(StatusCounts::from_incidents(&all))
            }
        })
    }

    /// Upsert documents from the original `incidente` collection, keeping their codes.
    ///
    /// Every document is validated before anything is written.
    ///
    /// # Errors
    ///
    /// Validation when any document is malformed; backend failures from the store.
    pub async fn import(&self, docs: Vec<IncidentDocument>) -> Result<usize, DirectoryError> {
        let now = Utc::now();
        let incidents = docs
            .into_iter()
            .map(|doc| doc.into_incident(now))
            .collect::<Result<Vec<_>, _>>()?;
        for incident in &incidents {
            self.incidents.put_incident(incident).await?;
        }
        tracing::info!(count = incidents.len(), "incidents imported");
        Ok(incidents.len())
    }

    async fn set_status(&self, code: &str, status: IncidentStatus) -> Result<(), DirectoryError> {
        let code = required("incident code", code)?;
        self.incidents.set_status(&code, status).await?;
        tracing::info!(%code, %status, "incident status changed");
        Ok(())
    }

    async fn find(
        &self,
        query: &str,
        filter: &IncidentFilter,
    ) -> Result<Vec<Incident>, DirectoryError> {
        let found = self.incidents.find_incidents(filter).await?;
        tracing::debug!(query, count = found.len(), "incident query");
        Ok(found)
    }
}
