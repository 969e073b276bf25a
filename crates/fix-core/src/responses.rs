//! Aggregate response types pushed to the read-only dashboards.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Incident;
use crate::enums::IncidentStatus;

/// Incident counts partitioned by reporter area.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AreaCounts {
    pub counts: BTreeMap<String, u64>,
}

impl AreaCounts {
    #[must_use]
    pub fn from_incidents(incidents: &[Incident]) -> Self {
        let mut counts = BTreeMap::new();
        for incident in incidents {
            *counts.entry(incident.reporter_area.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn get(&self, area: &str) -> u64 {
        self.counts.get(area).copied().unwrap_or(0)
    }
}

/// Incident counts partitioned by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusCounts {
    pub counts: BTreeMap<IncidentStatus, u64>,
}

impl StatusCounts {
    #[must_use]
    pub fn from_incidents(incidents: &[Incident]) -> Self {
        let mut counts = BTreeMap::new();
        for incident in incidents {
            *counts.entry(incident.status).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn get(&self, status: IncidentStatus) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}
