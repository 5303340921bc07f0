use thiserror::Error;

/// Configuration errors. These are the only fatal errors in the crate: a
/// malformed field path or a filter spec with duplicate option values is
/// rejected at setup time, not discovered mid-scan. Data-shape problems during
/// a scan (missing fields, type mismatches) are never errors; they resolve to
/// absence or a false predicate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field path is empty")]
    EmptyPath,

    #[error("field path `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("filter `{key}` has duplicate option value `{value}`")]
    DuplicateOption { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
