//! # fix-db
//!
//! libSQL document store for FixPoint.
//!
//! Holds the `incidents`, `users`, and `credentials` tables and implements the
//! `fix-core` repository traits plus the `fix-auth` identity provider on top of
//! them. Each mutation is a single-statement update, so it is atomic without an
//! explicit transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod store;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use repos::credential::DbIdentityProvider;
pub use service::FixStore;

/// Raw database handle: connection, migrations, and ID generation.
pub struct FixDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl FixDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let fix_db = Self { db, conn };
        fix_db.run_migrations().await?;
        Ok(fix_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"inc-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Current `PRAGMA data_version`. Changes only when another connection commits.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pragma query fails.
    pub async fn data_version(&self) -> Result<i64, DatabaseError> {
        data_version(&self.conn).await
    }
}

pub(crate) async fn data_version(conn: &libsql::Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn.query("PRAGMA data_version", ()).await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> FixDb {
        FixDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["users", "incidents", "credentials"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("inc").await.unwrap();
        assert!(id.starts_with("inc-"), "ID should start with 'inc-': {id}");
        assert_eq!(id.len(), 12, "ID should be 12 chars: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_unique() {
        let db = test_db().await;
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            ids.insert(db.generate_id("inc").await.unwrap());
        }
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn area_required_only_for_common_users() {
        let db = test_db().await;
        let bad = db
            .conn()
            .execute(
                "INSERT INTO users (id, name, role, area, created_at) VALUES ('u1', 'Ana', 'common', NULL, '2026-01-01T00:00:00Z')",
                (),
            )
            .await;
        assert!(bad.is_err());

        let bad = db
            .conn()
            .execute(
                "INSERT INTO users (id, name, role, area, created_at) VALUES ('u2', 'Luis', 'technician', 'IT', '2026-01-01T00:00:00Z')",
                (),
            )
            .await;
        assert!(bad.is_err());
    }
}
