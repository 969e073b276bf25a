//! ID prefixes for store-allocated identifiers.
//!
//! IDs have the form `{prefix}-{8 hex chars}`, e.g. `inc-a3f8b2c1`.

/// Incident codes.
pub const PREFIX_INCIDENT: &str = "inc";
/// Subject IDs issued by the local identity providers.
pub const PREFIX_SUBJECT: &str = "usr";

/// Format a prefixed ID from four random bytes.
#[must_use]
pub fn format_id(prefix: &str, bytes: [u8; 4]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}
