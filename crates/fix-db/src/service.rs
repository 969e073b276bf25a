//! Store handle shared by every repository.
//!
//! `FixStore` wraps `FixDb` (raw database access) and the incident change feed.
//! Repository methods are implemented as `impl FixStore` blocks in `repos/`.

use std::time::Duration;

use fix_core::repository::{CHANGE_FEED_CAPACITY, IncidentChange};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::FixDb;
use crate::error::DatabaseError;

/// Database handle plus change notification.
///
/// Every successful incident mutation publishes one [`IncidentChange`] after
/// the statement commits.
pub struct FixStore {
    db: FixDb,
    changes: broadcast::Sender<IncidentChange>,
}

impl FixStore {
    /// Open a store over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = FixDb::open_local(path).await?;
        Ok(Self::from_db(db))
    }

    #[must_use]
    pub fn from_db(db: FixDb) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self { db, changes }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &FixDb {
        &self.db
    }

    /// Announce a committed change. Having no subscribers is not an error.
    pub(crate) fn publish(&self, change: IncidentChange) {
        let _ = self.changes.send(change);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<IncidentChange> {
        self.changes.subscribe()
    }

    /// Poll `PRAGMA data_version` and publish [`IncidentChange::External`] when
    /// another process commits to the same database file.
    ///
    /// The task runs until aborted.
    #[must_use]
    pub fn spawn_external_watch(&self, interval: Duration) -> JoinHandle<()> {
        let conn = self.db.conn().clone();
        let changes = self.changes.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut last = None;
            loop {
                ticker.tick().await;
                match crate::data_version(&conn).await {
                    Ok(version) => {
                        if last.is_some_and(|prev| prev != version) {
                            tracing::debug!(version, "external commit detected");
                            let _ = changes.send(IncidentChange::External);
                        }
                        last = Some(version);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "data_version poll failed");
                    }
                }
            }
        })
    }
}
