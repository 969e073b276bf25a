use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::IncidentStatus;

/// A reported equipment problem tracked through its status lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Incident {
    /// Opaque code allocated by the store at creation.
    pub code: String,
    pub reporter_name: String,
    pub reporter_area: String,
    pub description: String,
    pub equipment_name: String,
    /// Technician user ID. Empty while the incident awaits assignment.
    pub assigned_technician: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    /// Whether a technician code has been written to this incident.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.assigned_technician.is_empty()
    }
}

/// Caller-supplied fields for a new incident. The store fills in the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewIncident {
    pub reporter_name: String,
    pub reporter_area: String,
    pub description: String,
    pub equipment_name: String,
}
