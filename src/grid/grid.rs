use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::request::{PaginatedRequest, PaginatedResponse, PaginationState};
use super::tracker::{RequestTicket, RequestTracker};
use crate::config::GridConfig;
use crate::error::ClientError;
use crate::filter::{FilterSet, SortConfig};

#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch_page(&self, request: &PaginatedRequest) -> Result<PaginatedResponse<T>, ClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridState<T> {
    pub rows: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub pagination: PaginationState,
    pub sorting: Vec<SortConfig>,
    pub loading: bool,
    pub error: Option<String>,
    /// Sequence number of the response currently displayed
    pub applied_seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Superseded before it resolved; discarded
    Stale,
    /// An identical request was already in flight
    Skipped,
    Failed(String),
}

/// Paginated remote table state.
///
/// Every fetch takes a sequence number; a response is applied only if it is
/// still the latest issued and the pagination has not moved since issue.
pub struct DataGrid<T> {
    inner: Arc<GridInner<T>>,
}

struct GridInner<T> {
    state: watch::Sender<GridState<T>>,
    filters: FilterSet,
    fetcher: Arc<dyn PageFetcher<T>>,
    tracker: RequestTracker,
    filter_debounce: Duration,
}

impl<T> Clone for DataGrid<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> DataGrid<T> {
    pub fn new(fetcher: Arc<dyn PageFetcher<T>>, filters: FilterSet, settings: &GridConfig) -> Self {
        let initial = GridState {
            rows: Vec::new(),
            total: 0,
            total_pages: 0,
            pagination: PaginationState::new(settings.default_page_size),
            sorting: Vec::new(),
            loading: false,
            error: None,
            applied_seq: 0,
        };
        let (state, _rx) = watch::channel(initial);

        Self {
            inner: Arc::new(GridInner {
                state,
                filters,
                fetcher,
                tracker: RequestTracker::new(),
                filter_debounce: settings.filter_debounce(),
            }),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.inner.filters
    }

    pub fn snapshot(&self) -> GridState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GridState<T>> {
        self.inner.state.subscribe()
    }

    pub fn rows(&self) -> Vec<T> {
        self.inner.state.borrow().rows.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn pagination(&self) -> PaginationState {
        self.inner.state.borrow().pagination
    }

    /// Request the grid would issue for its current state
    pub fn current_request(&self) -> PaginatedRequest {
        let state = self.inner.state.borrow();
        PaginatedRequest::new(state.pagination, state.sorting.clone(), self.inner.filters.to_filter_configs())
    }

    pub async fn refresh(&self) -> FetchOutcome {
        let request = self.current_request();
        let issued_pagination = self.pagination();

        let Some(ticket) = self.inner.tracker.begin(request) else {
            debug!("Skipping duplicate grid request, identical one in flight");
            return FetchOutcome::Skipped;
        };

        self.run(ticket, issued_pagination).await
    }

    /// Fetch the current request even if an identical one is in flight.
    /// Used after mutations, when an older response may predate the change.
    pub async fn reload(&self) -> FetchOutcome {
        let issued_pagination = self.pagination();
        let ticket = self.inner.tracker.begin_fresh(self.current_request());
        self.run(ticket, issued_pagination).await
    }

    async fn run(&self, ticket: RequestTicket, issued_pagination: PaginationState) -> FetchOutcome {
        self.inner.state.send_modify(|state| state.loading = true);
        let result = self.inner.fetcher.fetch_page(&ticket.request).await;
        self.apply(ticket, issued_pagination, result)
    }

    /// Refresh only when the current request differs from the last one issued
    pub async fn refresh_if_changed(&self) -> Option<FetchOutcome> {
        if self.inner.tracker.last_issued().as_ref() == Some(&self.current_request()) {
            return None;
        }
        Some(self.refresh().await)
    }

    fn apply(
        &self,
        ticket: RequestTicket,
        issued_pagination: PaginationState,
        result: Result<PaginatedResponse<T>, ClientError>,
    ) -> FetchOutcome {
        let current = self.inner.tracker.finish(&ticket);
        if self.pagination() != issued_pagination || !current {
            debug!(
                "Discarding stale grid response #{} (latest #{})",
                ticket.seq,
                self.inner.tracker.latest()
            );
            let tracker = &self.inner.tracker;
            self.inner.state.send_if_modified(|state| {
                if state.loading && tracker.is_idle() {
                    state.loading = false;
                    true
                } else {
                    false
                }
            });
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.inner.state.send_modify(|state| {
                    state.rows = page.data;
                    state.total = page.total;
                    state.total_pages = page.total_pages;
                    state.loading = false;
                    state.error = None;
                    state.applied_seq = ticket.seq;
                });
                FetchOutcome::Applied
            }
            Err(e) => {
                error!("Grid fetch failed: {}", e);
                let message = e.to_string();
                self.inner.state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(message.clone());
                });
                FetchOutcome::Failed(message)
            }
        }
    }

    /// Replace pagination and sorting without fetching; applies on the next refresh
    pub fn set_view(&self, pagination: PaginationState, sorting: Vec<SortConfig>) {
        self.inner.state.send_modify(|state| {
            state.pagination = pagination;
            state.sorting = sorting;
        });
    }

    pub async fn set_page(&self, page_index: u32) -> FetchOutcome {
        self.inner.state.send_modify(|state| state.pagination.page_index = page_index);
        self.refresh().await
    }

    /// Changing the page size returns to the first page
    pub async fn set_page_size(&self, page_size: u32) -> FetchOutcome {
        self.inner.state.send_modify(|state| {
            state.pagination = PaginationState::new(page_size);
        });
        self.refresh().await
    }

    pub async fn set_sorting(&self, sorting: Vec<SortConfig>) -> FetchOutcome {
        self.inner.state.send_modify(|state| state.sorting = sorting);
        self.refresh().await
    }

    /// Clear every column filter and go back to the first page
    pub async fn clear_all_filters(&self) -> FetchOutcome {
        self.inner.filters.clear_all();
        self.inner.state.send_modify(|state| state.pagination.page_index = 0);
        self.refresh().await
    }

    /// Refresh after the filter set has been quiet for the debounce window.
    /// Filter changes return the grid to its first page.
    pub fn watch_filters(&self) -> JoinHandle<()> {
        let mut rx = self.inner.filters.subscribe();
        let grid = self.clone();
        let quiet = self.inner.filter_debounce;

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                loop {
                    tokio::select! {
                        changed = rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                        _ = tokio::time::sleep(quiet) => break,
                    }
                }

                grid.inner.state.send_if_modified(|state| {
                    let moved = state.pagination.page_index != 0;
                    state.pagination.page_index = 0;
                    moved
                });
                if let Some(outcome) = grid.refresh_if_changed().await {
                    debug!("Filter-triggered refresh: {:?}", outcome);
                }
            }
        })
    }
}
