use std::fmt::Display;
use std::str::FromStr;

/// Parse a role or status in its storage form or legacy label.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let normalized = raw.trim().replace('-', "_");
    normalized
        .parse()
        .or_else(|_| raw.trim().parse())
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}
