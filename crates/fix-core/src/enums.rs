//! Status and role enums for FixPoint.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Each enum also knows the literal the original collections stored, so legacy
//! documents and display labels stay interchangeable with the storage form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// IncidentStatus
// ---------------------------------------------------------------------------

/// Status of an incident.
///
/// ```text
/// unattended → pending → solved
///            → solved
/// unattended → assigned (only with workflow.mark_assigned_on_assign)
/// ```
///
/// No transition is rejected: resolving or deferring overwrites whatever
/// status the incident had.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Unattended,
    Assigned,
    Pending,
    Solved,
}

impl IncidentStatus {
    pub const ALL: [Self; 4] = [Self::Unattended, Self::Assigned, Self::Pending, Self::Solved];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unattended => "unattended",
            Self::Assigned => "assigned",
            Self::Pending => "pending",
            Self::Solved => "solved",
        }
    }

    /// Label stored in the `estado` field of legacy documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unattended => "Sin atender",
            Self::Assigned => "Asignado",
            Self::Pending => "Pendiente",
            Self::Solved => "Solucionado",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = CoreError;

    /// Accepts the storage form (`"pending"`) or the legacy label (`"Pendiente"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown incident status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role of a registered user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Area chief: assigns technicians to unassigned incidents.
    Chief,
    /// Resolves or defers assigned incidents.
    Technician,
    /// Reports incidents and follows their status.
    Common,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Chief, Self::Technician, Self::Common];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chief => "chief",
            Self::Technician => "technician",
            Self::Common => "common",
        }
    }

    /// Literal stored in the `tipo` field of legacy documents.
    #[must_use]
    pub const fn legacy(self) -> &'static str {
        match self {
            Self::Chief => "jefe",
            Self::Technician => "tecnico",
            Self::Common => "comun",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.legacy() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown role '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("unattended", IncidentStatus::Unattended)]
    #[case("Sin atender", IncidentStatus::Unattended)]
    #[case("Asignado", IncidentStatus::Assigned)]
    #[case("pending", IncidentStatus::Pending)]
    #[case("Solucionado", IncidentStatus::Solved)]
    fn status_parses_storage_and_legacy_forms(
        #[case] raw: &str,
        #[case] expected: IncidentStatus,
    ) {
        assert_eq!(raw.parse::<IncidentStatus>().unwrap(), expected);
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        assert!("Pending".parse::<IncidentStatus>().is_err());
        assert!("pendiente".parse::<IncidentStatus>().is_err());
    }

    #[test]
    fn status_serde_matches_as_str() {
        for status in IncidentStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().into()));
        }
    }

    #[rstest]
    #[case("jefe", Role::Chief)]
    #[case("tecnico", Role::Technician)]
    #[case("comun", Role::Common)]
    #[case("technician", Role::Technician)]
    fn role_parses_storage_and_legacy_forms(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn unknown_role_is_validation_error() {
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
