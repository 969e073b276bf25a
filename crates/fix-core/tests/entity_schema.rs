//! JsonSchema validation of the serialized entity and response shapes.

use chrono::Utc;
use fix_core::entities::{Incident, User, UserKind};
use fix_core::enums::IncidentStatus;
use fix_core::identity::Session;
use fix_core::legacy::IncidentDocument;
use fix_core::responses::{AreaCounts, StatusCounts};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_incident() -> Incident {
    let now = Utc::now();
    Incident {
        code: "inc-a3f8b2c1".into(),
        reporter_name: "Ana".into(),
        reporter_area: "Finance".into(),
        description: "printer jam".into(),
        equipment_name: "PRN-02".into(),
        assigned_technician: String::new(),
        status: IncidentStatus::Unattended,
        created_at: now,
        updated_at: now,
    }
}

roundtrip_and_validate!(incident_roundtrip, Incident, sample_incident());

roundtrip_and_validate!(
    common_user_roundtrip,
    User,
    User {
        id: "usr-0a1b2c3d".into(),
        name: "Ana".into(),
        kind: UserKind::Common {
            area: "Finance".into(),
        },
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    session_without_profile_roundtrip,
    Session,
    Session {
        subject_id: "usr-0a1b2c3d".into(),
        email: "ana@example.com".into(),
        profile: None,
    }
);

roundtrip_and_validate!(
    legacy_document_roundtrip,
    IncidentDocument,
    IncidentDocument::from(&sample_incident())
);

roundtrip_and_validate!(
    status_counts_roundtrip,
    StatusCounts,
    StatusCounts::from_incidents(&[sample_incident()])
);

roundtrip_and_validate!(
    area_counts_roundtrip,
    AreaCounts,
    AreaCounts::from_incidents(&[sample_incident()])
);
