//! Shared test utilities for fix-db tests.

pub(crate) mod helpers {
    use fix_core::entities::{Incident, NewIncident};

    use crate::service::FixStore;

    /// Create an in-memory store.
    pub async fn test_store() -> FixStore {
        FixStore::open_local(":memory:").await.unwrap()
    }

    pub fn draft(reporter: &str, area: &str) -> NewIncident {
        NewIncident {
            reporter_name: reporter.into(),
            reporter_area: area.into(),
            description: "printer jam".into(),
            equipment_name: "PRN-02".into(),
        }
    }

    /// Insert an incident reported by `reporter` in `area`.
    pub async fn submit(store: &FixStore, reporter: &str, area: &str) -> Incident {
        store.create_incident(&draft(reporter, area)).await.unwrap()
    }
}
