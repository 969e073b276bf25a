use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::User;

/// Authenticated session returned by the login flow.
///
/// `profile` is `None` when the identity provider knows the subject but no user
/// document exists for it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    /// Subject ID issued by the identity provider.
    pub subject_id: String,
    pub email: String,
    pub profile: Option<User>,
}
