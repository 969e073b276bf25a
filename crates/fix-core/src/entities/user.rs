use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Role-specific user data. Only common users belong to an area.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum UserKind {
    Chief,
    Technician,
    Common { area: String },
}

impl UserKind {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Chief => Role::Chief,
            Self::Technician => Role::Technician,
            Self::Common { .. } => Role::Common,
        }
    }

    #[must_use]
    pub fn area(&self) -> Option<&str> {
        match self {
            Self::Common { area } => Some(area),
            Self::Chief | Self::Technician => None,
        }
    }
}

/// A registered user. `id` equals the subject ID issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: UserKind,
    pub created_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub const fn role(&self) -> Role {
        self.kind.role()
    }

    #[must_use]
    pub fn area(&self) -> Option<&str> {
        self.kind.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_user_serializes_role_tag_and_area() {
        let user = User {
            id: "usr-0a1b2c3d".into(),
            name: "Ana".into(),
            kind: UserKind::Common {
                area: "Finance".into(),
            },
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "common");
        assert_eq!(json["area"], "Finance");
    }

    #[test]
    fn technician_has_no_area_field() {
        let user = User {
            id: "usr-00000001".into(),
            name: "Luis".into(),
            kind: UserKind::Technician,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "technician");
        assert!(json.get("area").is_none());
        assert_eq!(user.area(), None);
    }
}
