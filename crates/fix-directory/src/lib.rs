//! # fix-directory
//!
//! Services the role views call: the incident directory (submit, assign,
//! resolve, dashboards), the user directory, and the login and registration
//! flows. Every service receives its repositories as `Arc<dyn ...>` so the
//! libSQL store and the in-memory test double (`memory::MemoryStore`, behind
//! the `test-support` feature) are interchangeable.
//!
//! Inputs are validated locally before any store call. Every failure surfaces
//! as a [`DirectoryError`] whose [`DirectoryError::user_message`] is the text
//! shown to the user.

pub mod accounts;
pub mod error;
pub mod incidents;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod subscription;
pub mod users;
mod validate;

pub use accounts::{Accounts, NewAccount};
pub use error::DirectoryError;
pub use incidents::{DirectoryOptions, IncidentDirectory};
pub use subscription::{Snapshot, Subscription};
pub use users::UserDirectory;
