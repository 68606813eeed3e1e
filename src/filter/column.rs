//! Per-column filter input with debounced commits.
//!
//! Local edits are held in the column until the input has been quiet for the
//! debounce window, then committed to the grid's [`FilterSet`]. A clear-all on
//! the set bumps its reset generation, and any timer armed under an older
//! generation is dropped without committing.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::error::FilterError;
use super::set::FilterSet;
use super::types::{ColumnFilterValue, FilterOperator};
use crate::config::FilterConfig as FilterSettings;

#[derive(Debug, Clone)]
pub struct ColumnFilterOptions {
    pub column_id: String,
    pub default_operator: FilterOperator,
    pub supported_operators: Vec<FilterOperator>,
    pub text_debounce: Duration,
    /// Zero commits operator changes immediately
    pub operator_debounce: Duration,
}

impl ColumnFilterOptions {
    pub fn new(column_id: impl Into<String>, settings: &FilterSettings) -> Self {
        Self {
            column_id: column_id.into(),
            default_operator: FilterOperator::Like,
            supported_operators: FilterOperator::text_operators(),
            text_debounce: settings.text_debounce(),
            operator_debounce: settings.operator_debounce(),
        }
    }

    pub fn with_operators(mut self, default_operator: FilterOperator, supported: Vec<FilterOperator>) -> Self {
        self.default_operator = default_operator;
        self.supported_operators = supported;
        if !self.supported_operators.contains(&default_operator) {
            self.supported_operators.insert(0, default_operator);
        }
        self
    }

    pub fn with_debounce(mut self, text: Duration, operator: Duration) -> Self {
        self.text_debounce = text;
        self.operator_debounce = operator;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilterState {
    pub value: String,
    pub operator: FilterOperator,
    /// Set while a local edit is waiting for its debounce window
    pub editing: bool,
}

pub struct ColumnFilter {
    options: ColumnFilterOptions,
    filters: FilterSet,
    state: Arc<watch::Sender<ColumnFilterState>>,
    mount_generation: u64,
    last_external: Option<ColumnFilterValue>,
    text_timer: Option<JoinHandle<()>>,
    operator_timer: Option<JoinHandle<()>>,
}

impl ColumnFilter {
    /// Mount a column against the grid's filter set, restoring any committed value
    pub fn mount(options: ColumnFilterOptions, filters: FilterSet) -> Self {
        let committed = filters.get(&options.column_id);
        let initial = Self::state_from(&options, committed.as_ref());
        let (tx, _rx) = watch::channel(initial);

        Self {
            mount_generation: filters.reset_generation(),
            last_external: committed,
            options,
            filters,
            state: Arc::new(tx),
            text_timer: None,
            operator_timer: None,
        }
    }

    fn state_from(options: &ColumnFilterOptions, committed: Option<&ColumnFilterValue>) -> ColumnFilterState {
        match committed {
            Some(filter) => ColumnFilterState {
                value: filter.value.clone(),
                operator: filter.operator,
                editing: false,
            },
            None => ColumnFilterState {
                value: String::new(),
                operator: options.default_operator,
                editing: false,
            },
        }
    }

    pub fn column_id(&self) -> &str {
        &self.options.column_id
    }

    pub fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    pub fn operator(&self) -> FilterOperator {
        self.state.borrow().operator
    }

    pub fn is_editing(&self) -> bool {
        self.state.borrow().editing
    }

    pub fn snapshot(&self) -> ColumnFilterState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ColumnFilterState> {
        self.state.subscribe()
    }

    pub fn supported_operators(&self) -> &[FilterOperator] {
        &self.options.supported_operators
    }

    /// Whether a clear-all happened since this column was mounted
    pub fn is_stale(&self) -> bool {
        self.filters.reset_generation() != self.mount_generation
    }

    /// Text input; commits once the input has been quiet for the text debounce window
    pub fn input(&mut self, value: impl Into<String>) {
        self.remount_if_stale();
        let value = value.into();
        self.state.send_modify(|state| {
            state.value = value;
            state.editing = true;
        });

        abort(&mut self.text_timer);
        self.text_timer = Some(self.schedule_commit(self.options.text_debounce));
    }

    /// Operator change; commits with the current text value after the operator debounce window
    pub fn select_operator(&mut self, operator: FilterOperator) -> Result<(), FilterError> {
        if !self.options.supported_operators.contains(&operator) {
            return Err(FilterError::OperatorNotOffered {
                column: self.options.column_id.clone(),
                operator: operator.to_string(),
            });
        }

        self.remount_if_stale();
        self.state.send_modify(|state| {
            state.operator = operator;
            state.editing = true;
        });

        abort(&mut self.operator_timer);
        if self.options.operator_debounce.is_zero() {
            commit(&self.filters, &self.state, &self.options.column_id, self.mount_generation);
        } else {
            self.operator_timer = Some(self.schedule_commit(self.options.operator_debounce));
        }
        Ok(())
    }

    /// Drop the local value and remove the committed filter immediately
    pub fn clear(&mut self) {
        self.abort_timers();
        self.reset_local();
        self.filters.set(&self.options.column_id, None);
        self.last_external = None;
    }

    /// Reconcile with the committed filter the grid currently holds for this column.
    ///
    /// While editing, external values are ignored, except a transition to "no filter"
    /// which always resets the column.
    pub fn sync_from_grid(&mut self) {
        if self.remount_if_stale() {
            return;
        }

        let external = self.filters.get(&self.options.column_id);
        let previous = std::mem::replace(&mut self.last_external, external.clone());

        match external {
            None if previous.is_some() => {
                self.abort_timers();
                self.reset_local();
            }
            None => {}
            Some(_) if self.is_editing() => {}
            Some(filter) => {
                self.state.send_modify(|state| {
                    state.value = filter.value;
                    state.operator = filter.operator;
                });
            }
        }
    }

    /// Re-mount after a clear-all: timers are dropped and local state returns to default
    pub fn remount(&mut self) {
        self.abort_timers();
        self.mount_generation = self.filters.reset_generation();
        let committed = self.filters.get(&self.options.column_id);
        let state = Self::state_from(&self.options, committed.as_ref());
        self.state.send_replace(state);
        self.last_external = committed;
    }

    fn remount_if_stale(&mut self) -> bool {
        if self.is_stale() {
            tracing::debug!("Column {} remounted after clear-all", self.options.column_id);
            self.remount();
            true
        } else {
            false
        }
    }

    fn reset_local(&self) {
        let default_operator = self.options.default_operator;
        self.state.send_modify(|state| {
            state.value.clear();
            state.operator = default_operator;
            state.editing = false;
        });
    }

    fn schedule_commit(&self, delay: Duration) -> JoinHandle<()> {
        let deadline = Instant::now() + delay;
        let filters = self.filters.clone();
        let state = Arc::clone(&self.state);
        let column_id = self.options.column_id.clone();
        let generation = self.mount_generation;

        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            commit(&filters, &state, &column_id, generation);
        })
    }

    fn abort_timers(&mut self) {
        abort(&mut self.text_timer);
        abort(&mut self.operator_timer);
    }
}

impl Drop for ColumnFilter {
    fn drop(&mut self) {
        self.abort_timers();
    }
}

fn abort(timer: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = timer.take() {
        handle.abort();
    }
}

fn commit(
    filters: &FilterSet,
    state: &watch::Sender<ColumnFilterState>,
    column_id: &str,
    generation: u64,
) {
    if filters.reset_generation() != generation {
        tracing::debug!("Dropping filter commit for {} from a cleared generation", column_id);
        return;
    }

    let current = state.borrow().clone();
    let next = if current.operator.requires_value() && current.value.trim().is_empty() {
        None
    } else if current.operator.requires_value() {
        Some(ColumnFilterValue {
            value: current.value,
            operator: current.operator,
        })
    } else {
        Some(ColumnFilterValue {
            value: String::new(),
            operator: current.operator,
        })
    };

    if filters.set(column_id, next) {
        tracing::debug!("Committed filter for column {}", column_id);
    }
    state.send_modify(|state| state.editing = false);
}
