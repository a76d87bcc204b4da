use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// -- Records returned by the server. Fields this crate does not read are kept
// in `extra` so a record passes through unchanged. --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Albums this artist owns
    #[serde(default)]
    pub albumcount: i64,
    /// Albums the artist appears on without owning them. Only set by
    /// `artists::get_artist`; may be negative when the server reports fewer
    /// album associations than `albumcount`.
    #[serde(
        rename = "appearanceCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub appearance_count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single server-side preference (system or user level)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ampache sends ids as strings, older servers as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
