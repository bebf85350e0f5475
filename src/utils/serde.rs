use serde::{Deserialize, Deserializer};

/// Deserializes an optional string, treating the empty string as `None`.
/// Query strings and HTML forms submit absent fields as `""`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}
