use std::sync::Arc;
use tokio::sync::watch;

use super::types::{ColumnFilterValue, FilterConfig};

/// Committed filters for one grid, in commit order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSetState {
    pub filters: Vec<(String, ColumnFilterValue)>,
    /// Bumped by clear-all; timers scheduled under an older generation never commit
    pub reset_generation: u64,
    /// Bumped on every effective change
    pub version: u64,
}

/// Shared handle over a grid's committed column filters
#[derive(Debug, Clone)]
pub struct FilterSet {
    state: Arc<watch::Sender<FilterSetState>>,
}

impl FilterSet {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FilterSetState::default());
        Self { state: Arc::new(tx) }
    }

    /// Commit or remove (`None`) the filter for a column. Returns whether anything changed.
    pub fn set(&self, column_id: &str, filter: Option<ColumnFilterValue>) -> bool {
        self.state.send_if_modified(|state| {
            let position = state.filters.iter().position(|(id, _)| id == column_id);
            let changed = match (position, filter) {
                (Some(index), Some(next)) => {
                    if state.filters[index].1 == next {
                        false
                    } else {
                        state.filters[index].1 = next;
                        true
                    }
                }
                (Some(index), None) => {
                    state.filters.remove(index);
                    true
                }
                (None, Some(next)) => {
                    state.filters.push((column_id.to_string(), next));
                    true
                }
                (None, None) => false,
            };
            if changed {
                state.version += 1;
            }
            changed
        })
    }

    pub fn get(&self, column_id: &str) -> Option<ColumnFilterValue> {
        self.state
            .borrow()
            .filters
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, filter)| filter.clone())
    }

    pub fn clear_all(&self) {
        self.state.send_modify(|state| {
            state.filters.clear();
            state.reset_generation += 1;
            state.version += 1;
        });
        tracing::debug!("Cleared all column filters");
    }

    pub fn reset_generation(&self) -> u64 {
        self.state.borrow().reset_generation
    }

    pub fn version(&self) -> u64 {
        self.state.borrow().version
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().filters.is_empty()
    }

    pub fn snapshot(&self) -> FilterSetState {
        self.state.borrow().clone()
    }

    /// Wire form for paginate requests
    pub fn to_filter_configs(&self) -> Vec<FilterConfig> {
        self.state
            .borrow()
            .filters
            .iter()
            .map(|(field, filter)| FilterConfig {
                field: field.clone(),
                operator: filter.operator,
                value: filter.value.clone(),
            })
            .collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterSetState> {
        self.state.subscribe()
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOperator;

    fn like(value: &str) -> Option<ColumnFilterValue> {
        Some(ColumnFilterValue {
            value: value.to_string(),
            operator: FilterOperator::Like,
        })
    }

    #[test]
    fn set_ignores_identical_commits() {
        let filters = FilterSet::new();
        assert!(filters.set("name", like("ann")));
        assert!(!filters.set("name", like("ann")));
        assert!(filters.set("name", like("anna")));
        assert_eq!(filters.version(), 2);
        assert_eq!(filters.get("name").unwrap().value, "anna");
    }

    #[test]
    fn remove_and_clear_all() {
        let filters = FilterSet::new();
        filters.set("name", like("a"));
        filters.set("email", like("b"));
        assert!(filters.set("name", None));
        assert!(!filters.set("name", None));
        assert_eq!(filters.to_filter_configs().len(), 1);

        filters.clear_all();
        assert!(filters.is_empty());
        assert_eq!(filters.reset_generation(), 1);
    }
}
