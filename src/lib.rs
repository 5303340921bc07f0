//! In-memory search/filter/stats engine for admin list pages.
//!
//! Records are plain `serde_json::Value`s; the caller supplies an ordered
//! dataset, the dot-paths free-text search should scan, and the facet filter
//! specs. The engine narrows the dataset (search ORs across fields, filters
//! AND across specs), preserves input order, and reports
//! total/filtered/has-filters stats. Everything is pure and synchronous;
//! [`FilterStateStore`] is the thin stateful wrapper list pages drive.

pub mod errors;
pub mod engine;
pub mod store;
mod path;
mod search;
mod spec;

pub use engine::{apply, compute, compute_stats, FilterConfig, FilterResult, FilterState, Stats};
pub use errors::{ConfigError, Result};
pub use path::{FieldPath, Resolved};
pub use search::SearchQuery;
pub use spec::{FilterOption, FilterSpec};
pub use store::FilterStateStore;
