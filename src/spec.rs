use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ConfigError, Result};
use crate::path::{FieldPath, Resolved};

/// One selectable facet value as rendered by a filter bar: the `value` is
/// what a selection carries, the `label` is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A facet filter: a field to read and a closed set of selectable values.
/// Filters are exact-match by design; free-text fuzziness belongs to
/// [`crate::search::SearchQuery`] alone.
///
/// Fields are private: every `FilterSpec` in existence went through
/// [`FilterSpec::new`] or deserialization, both of which validate, so a spec
/// with duplicate option values cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterSpec")]
pub struct FilterSpec {
    key: FieldPath,
    label: String,
    options: Vec<FilterOption>,
}

/// Unvalidated wire form; [`FilterSpec`] deserializes through this so the
/// uniqueness check also runs on config files.
#[derive(Deserialize)]
struct RawFilterSpec {
    key: FieldPath,
    label: String,
    options: Vec<FilterOption>,
}

impl TryFrom<RawFilterSpec> for FilterSpec {
    type Error = ConfigError;

    fn try_from(raw: RawFilterSpec) -> Result<Self> {
        let spec = Self {
            key: raw.key,
            label: raw.label,
            options: raw.options,
        };
        spec.validate()?;
        Ok(spec)
    }
}

impl FilterSpec {
    /// Sentinel selection meaning "no facet chosen". An absent selection and
    /// an explicit `"all"` behave identically.
    pub const ALL: &'static str = "all";

    pub fn new(key: &str, label: impl Into<String>, options: Vec<FilterOption>) -> Result<Self> {
        let spec = Self {
            key: FieldPath::parse(key)?,
            label: label.into(),
            options,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Option values must be unique per spec; duplicates would make a
    /// selection ambiguous in the filter bar.
    fn validate(&self) -> Result<()> {
        match self.options.iter().map(|o| &o.value).duplicates().next() {
            Some(value) => Err(ConfigError::DuplicateOption {
                key: self.key.as_str().to_owned(),
                value: value.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn key(&self) -> &FieldPath {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Display label for a selected value, for banner/empty-state messaging.
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    /// Does `record` satisfy this facet under `selected`?
    ///
    /// No selection (or the `"all"` sentinel) is vacuously true. Otherwise the
    /// field is resolved and compared by its runtime type: absent is never
    /// satisfied, booleans compare against the literal strings
    /// `"true"`/`"false"` (selections always arrive as strings), arrays test
    /// membership of the selected value, and scalars compare by string
    /// equality after coercion.
    pub fn satisfies(&self, record: &Value, selected: Option<&str>) -> bool {
        let selected = match selected {
            None => return true,
            Some(s) if s == Self::ALL => return true,
            Some(s) => s,
        };
        match self.key.resolve(record) {
            Resolved::Absent => false,
            Resolved::Found(value) => selection_matches(value, selected),
        }
    }
}

/// Tagged-value comparison: classify the resolved value's type first, then
/// dispatch to the matching coercion rule. No duck-typed loose equality.
fn selection_matches(value: &Value, selected: &str) -> bool {
    match value {
        Value::Bool(b) => bool_text(*b) == selected,
        Value::Array(items) => items.iter().any(|item| scalar_eq(item, selected)),
        other => scalar_eq(other, selected),
    }
}

fn scalar_eq(value: &Value, selected: &str) -> bool {
    match value {
        Value::String(s) => s == selected,
        Value::Number(n) => n.to_string() == selected,
        Value::Bool(b) => bool_text(*b) == selected,
        // null, nested arrays, objects: nothing a string selection can equal
        _ => false,
    }
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
