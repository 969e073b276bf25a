//! Entity structs for the FixPoint domain objects.
//!
//! Each entity maps to one table in the store (`incidents`, `users`). Stored entities
//! derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema validation.

mod incident;
mod user;

pub use incident::{Incident, NewIncident};
pub use user::{User, UserKind};
