//! Incident repository — insert, filtered queries, single-field updates.

use chrono::{DateTime, Utc};

use fix_core::entities::{Incident, NewIncident};
use fix_core::enums::IncidentStatus;
use fix_core::ids::PREFIX_INCIDENT;
use fix_core::repository::{IncidentChange, IncidentFilter};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_enum};
use crate::service::FixStore;

const SELECT_COLS: &str = "code, reporter_name, reporter_area, description, equipment_name, \
     technician_code, status, created_at, updated_at";

fn row_to_incident(row: &libsql::Row) -> Result<Incident, DatabaseError> {
    Ok(Incident {
        code: row.get(0)?,
        reporter_name: row.get(1)?,
        reporter_area: row.get(2)?,
        description: row.get(3)?,
        equipment_name: row.get(4)?,
        assigned_technician: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Build the WHERE clause and its positional parameters for `filter`.
fn filter_clause(filter: &IncidentFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(ref technician) = filter.technician {
        params.push(technician.clone().into());
        conditions.push(format!("technician_code = ?{}", params.len()));
    }
    if let Some(status) = filter.status {
        params.push(status.as_str().into());
        conditions.push(format!("status = ?{}", params.len()));
    }
    if let Some(ref reporter) = filter.reporter_name {
        params.push(reporter.clone().into());
        conditions.push(format!("reporter_name = ?{}", params.len()));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), params)
    }
}

impl FixStore {
    pub async fn create_incident(&self, draft: &NewIncident) -> Result<Incident, DatabaseError> {
        let now = Utc::now();
        let code = self.db().generate_id(PREFIX_INCIDENT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO incidents (code, reporter_name, reporter_area, description, equipment_name, technician_code, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, '', ?6, ?7, ?8)",
                libsql::params![
                    code.as_str(),
                    draft.reporter_name.as_str(),
                    draft.reporter_area.as_str(),
                    draft.description.as_str(),
                    draft.equipment_name.as_str(),
                    IncidentStatus::Unattended.as_str(),
                    format_datetime(now),
                    format_datetime(now)
                ],
            )
            .await?;

        let incident = Incident {
            code: code.clone(),
            reporter_name: draft.reporter_name.clone(),
            reporter_area: draft.reporter_area.clone(),
            description: draft.description.clone(),
            equipment_name: draft.equipment_name.clone(),
            assigned_technician: String::new(),
            status: IncidentStatus::Unattended,
            created_at: truncate_micros(now),
            updated_at: truncate_micros(now),
        };

        self.publish(IncidentChange::Created { code });
        Ok(incident)
    }

    pub async fn get_incident(&self, code: &str) -> Result<Incident, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM incidents WHERE code = ?1"),
                [code],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_incident(&row)
    }

    pub async fn list_incidents(
        &self,
        filter: &IncidentFilter,
    ) -> Result<Vec<Incident>, DatabaseError> {
        let (where_clause, params) = filter_clause(filter);
        let sql =
            format!("SELECT {SELECT_COLS} FROM incidents {where_clause} ORDER BY created_at, code");
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut incidents = Vec::new();
        while let Some(row) = rows.next().await? {
            incidents.push(row_to_incident(&row)?);
        }
        Ok(incidents)
    }

    /// Write the technician code (and optionally the status) in one statement.
    pub async fn assign_technician(
        &self,
        code: &str,
        technician: &str,
        status: Option<IncidentStatus>,
    ) -> Result<(), DatabaseError> {
        let now = format_datetime(Utc::now());
        let affected = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .execute(
                        "UPDATE incidents SET technician_code = ?1, status = ?2, updated_at = ?3 WHERE code = ?4",
                        libsql::params![technician, status.as_str(), now, code],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .execute(
                        "UPDATE incidents SET technician_code = ?1, updated_at = ?2 WHERE code = ?3",
                        libsql::params![technician, now, code],
                    )
                    .await?
            }
        };
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }

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

    pub async fn update_incident_status(
        &self,
        code: &str,
        status: IncidentStatus,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE incidents SET status = ?1, updated_at = ?2 WHERE code = ?3",
                libsql::params![status.as_str(), format_datetime(Utc::now()), code],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.publish(IncidentChange::StatusSet {
            code: code.to_string(),
            status,
        });
        Ok(())
    }

    /// Insert or overwrite an incident under its own code.
    pub async fn upsert_incident(&self, incident: &Incident) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO incidents (code, reporter_name, reporter_area, description, equipment_name, technician_code, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(code) DO UPDATE SET
                    reporter_name = excluded.reporter_name,
                    reporter_area = excluded.reporter_area,
                    description = excluded.description,
                    equipment_name = excluded.equipment_name,
                    technician_code = excluded.technician_code,
                    status = excluded.status,
                    updated_at = excluded.updated_at",
                libsql::params![
                    incident.code.as_str(),
                    incident.reporter_name.as_str(),
                    incident.reporter_area.as_str(),
                    incident.description.as_str(),
                    incident.equipment_name.as_str(),
                    incident.assigned_technician.as_str(),
                    incident.status.as_str(),
                    format_datetime(incident.created_at),
                    format_datetime(incident.updated_at)
                ],
            )
            .await?;

        self.publish(IncidentChange::Imported {
            code: incident.code.clone(),
        });
        Ok(())
    }
}

/// Match the precision the row will have after a store roundtrip.
fn truncate_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    parse_datetime(&format_datetime(dt)).unwrap_or(dt)
}
