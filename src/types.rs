/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Table operations issued against the remote data gateway.
/// Used for call accounting in the in-memory gateway and for write logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Select,
    Insert,
    Update,
    Upsert,
    Delete,
    Upload,
}

/// Row identifier as stored by the backend.
/// Cases, blocks and submissions use uuid strings, services use serial integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    /// Parse an id coming from a URL path segment.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => RowId::Int(n),
            Err(_) => RowId::Text(raw.to_string()),
        }
    }

    /// Loose comparison against a JSON value, so `7` and `"7"` match.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::Number(n) => n.to_string() == self.to_string(),
            serde_json::Value::String(s) => *s == self.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        RowId::Text(s)
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

impl Default for RowId {
    fn default() -> Self {
        RowId::Text(String::new())
    }
}
