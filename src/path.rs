use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ConfigError, Result};

/// A dot-separated field path, e.g. `"owner.name"`, compiled once at
/// configuration time into its key segments. Paths are validated eagerly:
/// empty paths and empty segments (`"a..b"`, `".a"`) are configuration
/// errors, never query-time surprises.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ConfigError::EmptySegment(raw.to_owned()));
        }
        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Walk the record along this path. Any non-object intermediate value or
    /// missing key yields [`Resolved::Absent`]; this never fails. A final
    /// array value is returned as-is — paths do not index into array elements.
    pub fn resolve<'a>(&self, record: &'a Value) -> Resolved<'a> {
        let mut current = record;
        for segment in &self.segments {
            match current {
                Value::Object(map) => match map.get(segment) {
                    Some(next) => current = next,
                    None => return Resolved::Absent,
                },
                _ => return Resolved::Absent,
            }
        }
        Resolved::Found(current)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> String {
        path.raw
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Outcome of resolving a path against a record. `Absent` is distinct from
/// `Found(Value::Null)`: a missing field and a field explicitly set to null
/// are different observations, and the search and predicate layers treat them
/// accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Found(&'a Value),
    Absent,
}

impl<'a> Resolved<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Found(v) => Some(v),
            Resolved::Absent => None,
        }
    }
}
