use itertools::Itertools;
use serde_json::Value;

use crate::path::{FieldPath, Resolved};

/// A free-text query, normalized once per state change rather than once per
/// record: the raw text is trimmed and lower-cased at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// True when the trimmed query is empty, i.e. no search is active.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Case-insensitive substring test, ORed across the search fields: the
    /// record matches if any field's stringified value contains the needle.
    /// An empty query matches every record. Search broadens where filters
    /// narrow; the OR here is intentional asymmetry against the AND in
    /// [`crate::engine::compute`].
    pub fn matches(&self, record: &Value, fields: &[FieldPath]) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        fields.iter().any(|path| match path.resolve(record) {
            Resolved::Absent => false,
            Resolved::Found(value) => haystack(value).contains(&self.needle),
        })
    }
}

/// Lower-cased searchable text for one resolved value. Arrays flatten their
/// primitive elements joined by a space; nested arrays/objects inside an
/// array contribute nothing. Null stringifies to empty, so it can never
/// contain a non-empty needle.
fn haystack(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_array() && !item.is_object())
            .map(scalar_text)
            .join(" ")
            .to_lowercase(),
        other => scalar_text(other).to_lowercase(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
