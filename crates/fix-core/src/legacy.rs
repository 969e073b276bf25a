//! Documents in the shape of the original `incidente` and `usuario` collections.
//!
//! Field names follow the original schema (`codigo`, `nombreUsuario`, ...). These
//! types are used for import and export only; the rest of the system works with
//! [`Incident`] and [`User`].

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Incident, User, UserKind};
use crate::enums::{IncidentStatus, Role};
use crate::errors::CoreError;

/// One document of the `incidente` collection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDocument {
    pub codigo: String,
    pub nombre_usuario: String,
    pub area_usuario: String,
    pub descripcion: String,
    /// Legacy label (`"Sin atender"`) or storage form (`"unattended"`).
    pub estado: String,
    #[serde(default)]
    pub codigo_tecnico: Option<String>,
    pub nombre_equipo: String,
}

impl IncidentDocument {
    /// Convert to an [`Incident`], stamping both timestamps with `now`.
    ///
    /// A null `codigoTecnico` becomes `""`: nothing in this system distinguishes
    /// "never set" from "unassigned".
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank code, reporter, area,
    /// description or equipment name, or for an unknown status.
    pub fn into_incident(self, now: DateTime<Utc>) -> Result<Incident, CoreError> {
        for (field, value) in [
            ("codigo", &self.codigo),
            ("nombreUsuario", &self.nombre_usuario),
            ("areaUsuario", &self.area_usuario),
            ("descripcion", &self.descripcion),
            ("nombreEquipo", &self.nombre_equipo),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "incident document has a blank {field}"
                )));
            }
        }
        let status = self.estado.parse::<IncidentStatus>()?;
        Ok(Incident {
            code: self.codigo,
            reporter_name: self.nombre_usuario,
            reporter_area: self.area_usuario,
            description: self.descripcion,
            equipment_name: self.nombre_equipo,
            assigned_technician: self.codigo_tecnico.unwrap_or_default(),
            status,
            created_at: now,
            updated_at: now,
        })
    }
}

impl From<&Incident> for IncidentDocument {
    fn from(incident: &Incident) -> Self {
        Self {
            codigo: incident.code.clone(),
            nombre_usuario: incident.reporter_name.clone(),
            area_usuario: incident.reporter_area.clone(),
            descripcion: incident.description.clone(),
            estado: incident.status.label().to_string(),
            codigo_tecnico: Some(incident.assigned_technician.clone()),
            nombre_equipo: incident.equipment_name.clone(),
        }
    }
}

/// One document of the `usuario` collection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub id_usuario: String,
    pub nombre: String,
    /// `"jefe"`, `"tecnico"`, `"comun"`, or the storage form of [`Role`].
    pub tipo: String,
    #[serde(default)]
    pub area: Option<String>,
}

impl UserDocument {
    /// Convert to a [`User`]. The area is kept only for common users.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank ID or name, an unknown role,
    /// or a common user without an area.
    pub fn into_user(self, now: DateTime<Utc>) -> Result<User, CoreError> {
        if self.id_usuario.trim().is_empty() || self.nombre.trim().is_empty() {
            return Err(CoreError::Validation(
                "user document needs idUsuario and nombre".into(),
            ));
        }
        let kind = match self.tipo.parse::<Role>()? {
            Role::Chief => UserKind::Chief,
            Role::Technician => UserKind::Technician,
            Role::Common => match self.area {
                Some(area) if !area.trim().is_empty() => UserKind::Common { area },
                _ => {
                    return Err(CoreError::Validation(format!(
                        "common user '{}' has no area",
                        self.id_usuario
                    )));
                }
            },
        };
        Ok(User {
            id: self.id_usuario,
            name: self.nombre,
            kind,
            created_at: now,
        })
    }
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            id_usuario: user.id.clone(),
            nombre: user.name.clone(),
            tipo: user.role().legacy().to_string(),
            area: user.area().map(String::from),
        }
    }
}
