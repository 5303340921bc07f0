use serde_json::Value;

use crate::engine::{self, FilterConfig, FilterState, Stats};

/// Stateful wrapper over the pure engine: owns the dataset, the validated
/// configuration, and the current [`FilterState`] snapshot, and keeps the
/// last computed result in step with them. The model is fully synchronous —
/// every mutation recomputes before returning, so observers never see a
/// stale result.
#[derive(Debug, Clone)]
pub struct FilterStateStore {
    dataset: Vec<Value>,
    config: FilterConfig,
    state: FilterState,
    filtered: Vec<Value>,
    stats: Stats,
}

impl FilterStateStore {
    /// Starts with an empty state: no query, no selections, so
    /// `filtered_data` initially equals the dataset.
    pub fn new(dataset: Vec<Value>, config: FilterConfig) -> Self {
        let mut store = Self {
            dataset,
            config,
            state: FilterState::new(),
            filtered: Vec::new(),
            stats: Stats::default(),
        };
        store.recompute();
        store
    }

    /// The sole state mutator. Replaces the snapshot wholesale — the caller
    /// constructs the complete next state, including every selection it wants
    /// kept; nothing is merged silently. Idempotent for identical `next`.
    pub fn handle_filters_change(&mut self, next: FilterState) {
        self.state = next;
        self.recompute();
    }

    /// Swap in a new dataset, keeping the current query and selections.
    pub fn replace_dataset(&mut self, dataset: Vec<Value>) {
        self.dataset = dataset;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.filtered = engine::compute(&self.dataset, &self.config, &self.state);
        self.stats = engine::compute_stats(&self.dataset, &self.config, &self.state, &self.filtered);
    }

    pub fn filtered_data(&self) -> &[Value] {
        &self.filtered
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn placeholder(&self) -> &str {
        self.config.placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FilterOption, FilterSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn store() -> FilterStateStore {
        let dataset = vec![
            json!({"name": "Amina", "role": "admin"}),
            json!({"name": "Bayo", "role": "agent"}),
            json!({"name": "Chidi", "role": "agent"}),
        ];
        let config = FilterConfig::new(
            &["name"],
            vec![FilterSpec::new(
                "role",
                "Role",
                vec![
                    FilterOption::new("admin", "Admin"),
                    FilterOption::new("agent", "Agent"),
                ],
            )
            .unwrap()],
            "Search users...",
        )
        .unwrap();
        FilterStateStore::new(dataset, config)
    }

    #[test]
    fn starts_neutral_with_full_dataset() {
        let store = store();
        assert_eq!(store.filtered_data().len(), 3);
        assert_eq!(
            store.stats(),
            Stats {
                total: 3,
                filtered: 3,
                has_filters: false
            }
        );
        assert_eq!(store.placeholder(), "Search users...");
    }

    #[test]
    fn change_replaces_state_wholesale() {
        let mut store = store();
        store.handle_filters_change(FilterState::new().with_selection("role", "agent"));
        assert_eq!(store.filtered_data().len(), 2);

        // next snapshot carries only the query; the previous selection is
        // gone because nothing merges
        store.handle_filters_change(FilterState::new().with_query("amina"));
        assert_eq!(store.filtered_data().len(), 1);
        assert_eq!(store.filtered_data()[0]["role"], json!("admin"));
        assert_eq!(store.state().selection("role"), None);
    }

    #[test]
    fn identical_updates_are_idempotent() {
        let mut store = store();
        let state = FilterState::new().with_query("b").with_selection("role", "agent");
        store.handle_filters_change(state.clone());
        let first: Vec<Value> = store.filtered_data().to_vec();
        let first_stats = store.stats();
        store.handle_filters_change(state);
        assert_eq!(store.filtered_data(), first.as_slice());
        assert_eq!(store.stats(), first_stats);
    }

    #[test]
    fn replace_dataset_keeps_state() {
        let mut store = store();
        store.handle_filters_change(FilterState::new().with_selection("role", "agent"));
        store.replace_dataset(vec![json!({"name": "Dele", "role": "agent"})]);
        assert_eq!(store.stats().total, 1);
        assert_eq!(store.stats().filtered, 1);
        assert!(store.stats().has_filters);
        assert_eq!(store.state().selection("role"), Some("agent"));
    }

    #[test]
    fn empty_dataset_still_reports_state_derived_flag() {
        let mut store = store();
        store.replace_dataset(Vec::new());
        store.handle_filters_change(FilterState::new().with_query("anything"));
        assert_eq!(
            store.stats(),
            Stats {
                total: 0,
                filtered: 0,
                has_filters: true
            }
        );
        assert!(store.filtered_data().is_empty());
    }
}
