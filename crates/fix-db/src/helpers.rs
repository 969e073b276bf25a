//! Row-to-entity parsing helpers.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Fixed-width RFC 3339 so that TEXT ordering matches chronological ordering.
#[must_use]
pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all fix-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?)
}

#[cfg(test)]
mod tests {
    use fix_core::enums::{IncidentStatus, Role};
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_rfc3339_and_sqlite_formats() {
        assert!(parse_datetime("2026-02-09T14:30:00+00:00").is_ok());
        assert!(parse_datetime("2026-02-09 14:30:00").is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn formatted_datetimes_sort_chronologically() {
        let a = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let b = a + chrono::Duration::microseconds(1);
        let c = a + chrono::Duration::milliseconds(900);
        let mut strings = vec![format_datetime(c), format_datetime(a), format_datetime(b)];
        strings.sort();
        assert_eq!(
            strings,
            vec![format_datetime(a), format_datetime(b), format_datetime(c)]
        );
    }

    #[rstest]
    #[case("unattended", IncidentStatus::Unattended)]
    #[case("assigned", IncidentStatus::Assigned)]
    #[case("pending", IncidentStatus::Pending)]
    #[case("solved", IncidentStatus::Solved)]
    fn parse_enum_reads_status_column(#[case] raw: &str, #[case] expected: IncidentStatus) {
        assert_eq!(parse_enum::<IncidentStatus>(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("chief", Role::Chief)]
    #[case("technician", Role::Technician)]
    #[case("common", Role::Common)]
    fn parse_enum_reads_role_column(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(parse_enum::<Role>(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("Pendiente")]
    #[case("jefe")]
    #[case("")]
    fn parse_enum_rejects_display_labels(#[case] raw: &str) {
        assert!(parse_enum::<IncidentStatus>(raw).is_err());
        assert!(parse_enum::<Role>(raw).is_err());
    }
}
