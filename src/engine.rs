use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::path::FieldPath;
use crate::search::SearchQuery;
use crate::spec::FilterSpec;

/// =========================
/// Configuration
/// =========================

/// Everything a list page supplies besides the dataset itself: which fields
/// free-text search scans, which facet filters exist, and the search-box
/// placeholder (display-only, passed through untouched). All validation
/// happens at construction, eagerly; nothing is re-parsed per record. Fields
/// are private so a config cannot be assembled around the validation —
/// [`FilterConfig::new`] and deserialization are the only ways in, and the
/// parts they accept ([`FieldPath`], [`FilterSpec`]) are themselves
/// validated types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    search_fields: Vec<FieldPath>,
    filter_specs: Vec<FilterSpec>,
    #[serde(default)]
    placeholder: String,
}

impl FilterConfig {
    pub fn new(
        search_fields: &[&str],
        filter_specs: Vec<FilterSpec>,
        placeholder: impl Into<String>,
    ) -> Result<Self> {
        let search_fields = search_fields
            .iter()
            .map(|raw| FieldPath::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            search_fields,
            filter_specs,
            placeholder: placeholder.into(),
        })
    }

    pub fn search_fields(&self) -> &[FieldPath] {
        &self.search_fields
    }

    pub fn filter_specs(&self) -> &[FilterSpec] {
        &self.filter_specs
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

/// =========================
/// State snapshot
/// =========================

/// Current query text and facet selections, keyed by the spec's dot-path.
/// A snapshot is immutable in spirit: it is created empty, built up with the
/// `with_*` constructors, and replaced wholesale on every change — never
/// partially mutated in place. Selections use a BTreeMap so iteration order
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub selections: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query_text: impl Into<String>) -> Self {
        self.query_text = query_text.into();
        self
    }

    pub fn with_selection(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.selections.insert(key.into(), value.into());
        self
    }

    pub fn selection(&self, key: &str) -> Option<&str> {
        self.selections.get(key).map(String::as_str)
    }
}

/// =========================
/// Engine
/// =========================

/// Narrow `dataset` to the records matching the current state: free-text
/// search ORed across `config.search_fields` AND every facet predicate in
/// `config.filter_specs`. Pure; identical inputs give identical output.
/// Input order is preserved — the result is always a subsequence of
/// `dataset`. Predicates short-circuit per record, but every record is
/// visited so `Stats::total` stays accurate.
pub fn compute(dataset: &[Value], config: &FilterConfig, state: &FilterState) -> Vec<Value> {
    let query = SearchQuery::new(&state.query_text);
    let filtered: Vec<Value> = dataset
        .iter()
        .filter(|record| {
            query.matches(record, &config.search_fields)
                && config
                    .filter_specs
                    .iter()
                    .all(|spec| spec.satisfies(record, state.selection(spec.key().as_str())))
        })
        .cloned()
        .collect();
    tracing::debug!(
        total = dataset.len(),
        filtered = filtered.len(),
        query = %state.query_text.trim(),
        "recomputed filter result"
    );
    filtered
}

/// =========================
/// Stats
/// =========================

/// Aggregate counts for banner and empty-state messaging. `has_filters`
/// distinguishes "zero results because the filters excluded everything" from
/// "no filters applied but the dataset is empty".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub filtered: usize,
    pub has_filters: bool,
}

/// Derive stats from the engine's inputs and output. `has_filters` is true
/// iff the trimmed query is non-empty or any spec has a selection other than
/// absent/`"all"` — selections for keys no spec owns do not count.
pub fn compute_stats(
    dataset: &[Value],
    config: &FilterConfig,
    state: &FilterState,
    filtered: &[Value],
) -> Stats {
    let has_filters = !state.query_text.trim().is_empty()
        || config.filter_specs.iter().any(|spec| {
            state
                .selection(spec.key().as_str())
                .is_some_and(|v| v != FilterSpec::ALL)
        });
    Stats {
        total: dataset.len(),
        filtered: filtered.len(),
        has_filters,
    }
}

/// A computed result: the narrowed records plus their stats. Derived, never
/// stored outside [`crate::store::FilterStateStore`]'s cache; recomputed from
/// a single state snapshot on every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    pub filtered_data: Vec<Value>,
    pub stats: Stats,
}

/// One-shot convenience: compute filtered data and stats together.
pub fn apply(dataset: &[Value], config: &FilterConfig, state: &FilterState) -> FilterResult {
    let filtered_data = compute(dataset, config, state);
    let stats = compute_stats(dataset, config, state, &filtered_data);
    FilterResult {
        filtered_data,
        stats,
    }
}
