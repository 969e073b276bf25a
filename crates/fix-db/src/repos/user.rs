//! User repository — profile documents keyed by subject ID.

use fix_core::entities::{User, UserKind};
use fix_core::enums::Role;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::FixStore;

const SELECT_COLS: &str = "id, name, role, area, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    let id: String = row.get(0)?;
    let role: Role = parse_enum(&row.get::<String>(2)?)?;
    let area = get_opt_string(row, 3)?;
    let kind = match (role, area) {
        (Role::Chief, _) => UserKind::Chief,
        (Role::Technician, _) => UserKind::Technician,
        (Role::Common, Some(area)) => UserKind::Common { area },
        (Role::Common, None) => {
            return Err(DatabaseError::InvalidState(format!(
                "common user {id} has no area"
            )));
        }
    };
    Ok(User {
        id,
        name: row.get(1)?,
        kind,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl FixStore {
    /// Create or overwrite the user document keyed by `user.id`.
    pub async fn upsert_user(&self, user: &User) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, name, role, area, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    role = excluded.role,
                    area = excluded.area",
                libsql::params![
                    user.id.as_str(),
                    user.name.as_str(),
                    user.role().as_str(),
                    user.area(),
                    format_datetime(user.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE role = ?1 ORDER BY name, id"),
                [role.as_str()],
            )
            .await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }
}
