//! Log list controller
//!
//! Owns the presentation-facing state for the log list view and coordinates
//! queries against the external store. Every parameter change (filter, sort,
//! page) issues a fresh query tagged with a monotonically increasing
//! generation token; a response is applied only if its token is still current
//! when it completes, so a superseded request can never overwrite state
//! produced by a later one, regardless of network completion order.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::domain::{
    DomainError, LogFilter, LogFilterUpdate, LogSort, LogStore, OrderAuthority, SortColumn,
};
use crate::models::{LogEntry, OrderStatus};
use crate::services::pagination;

/// Fixed page size for the log list.
pub const PAGE_SIZE: u64 = 15;

/// Latest-applied snapshot for the list view. `page_window` is derived on
/// snapshot, not stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogListState {
    pub entries: Vec<LogEntry>,
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub page_window: Vec<u64>,
    pub filter: LogFilter,
    pub sort: LogSort,
    pub loading: bool,
    pub error: Option<String>,
    /// Entry ids with an order-status mutation in flight.
    pub updating: HashSet<String>,
}

pub struct LogListController {
    store: Arc<dyn LogStore>,
    authority: Arc<dyn OrderAuthority>,
    generation: AtomicU64,
    state: RwLock<LogListState>,
}

impl LogListController {
    pub fn new(store: Arc<dyn LogStore>, authority: Arc<dyn OrderAuthority>) -> Self {
        Self {
            store,
            authority,
            generation: AtomicU64::new(0),
            state: RwLock::new(LogListState {
                current_page: 1,
                ..Default::default()
            }),
        }
    }

    /// Current state, with the visible page-number window derived.
    pub async fn snapshot(&self) -> LogListState {
        let mut state = self.state.read().await.clone();
        state.page_window = pagination::page_window(state.current_page, state.total_pages);
        state
    }

    /// Re-issue the query for the current parameters. Also the retry path
    /// after a failure.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    /// Navigate to a page. The request is clamped to the valid range before
    /// anything is sent to the store; filters and sort are left untouched.
    pub async fn set_page(&self, requested: u64) {
        {
            let mut state = self.state.write().await;
            let page = pagination::clamp_page(requested, state.total_pages);
            if page == state.current_page {
                return;
            }
            state.current_page = page;
        }
        self.fetch().await;
    }

    /// Merge a partial filter update and re-query from page 1.
    pub async fn update_filter(&self, update: LogFilterUpdate) {
        {
            let mut state = self.state.write().await;
            state.filter = state.filter.merged(update);
            state.current_page = 1;
        }
        self.fetch().await;
    }

    /// Apply the sort toggle rule for `column` and re-query from page 1.
    pub async fn toggle_sort(&self, column: SortColumn) {
        {
            let mut state = self.state.write().await;
            state.sort = state.sort.toggle(column);
            state.current_page = 1;
        }
        self.fetch().await;
    }

    /// Drop every filter and re-query from page 1.
    pub async fn clear_filters(&self) {
        {
            let mut state = self.state.write().await;
            state.filter = LogFilter::default();
            state.current_page = 1;
        }
        self.fetch().await;
    }

    async fn fetch(&self) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (filter, sort, page) = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            (state.filter.clone(), state.sort, state.current_page)
        };

        tracing::debug!(
            "Querying logs - page={}, sort={:?}, filter_empty={}",
            page,
            sort,
            filter.is_empty()
        );

        let result = self.store.query_logs(&filter, &sort, page, PAGE_SIZE).await;

        let mut state = self.state.write().await;
        if token != self.generation.load(Ordering::SeqCst) {
            // A later request superseded this one while it was in flight.
            tracing::debug!("Discarding stale log query response (generation {})", token);
            return;
        }

        match result {
            Ok(log_page) => {
                state.total = log_page.total;
                state.total_pages = pagination::total_pages(log_page.total, PAGE_SIZE);
                state.entries = log_page.entries;
                state.loading = false;
            }
            Err(e) => {
                tracing::warn!("Log query failed: {}", e);
                state.loading = false;
                state.error = Some(e.to_string());
            }
        }
    }

    /// Request an order-status transition for one entry. The status string is
    /// validated against the closed set before any store interaction, and the
    /// entry must carry a linked order reference. On confirmation the local
    /// projection is patched in place; failures are scoped to this entry and
    /// never touch the page-level error.
    pub async fn set_order_status(&self, log_id: &str, status: &str) -> Result<(), DomainError> {
        let status: OrderStatus = status.parse().map_err(DomainError::MutationRejected)?;

        let linked_order_ref = {
            let mut state = self.state.write().await;
            let entry = state
                .entries
                .iter()
                .find(|e| e.id == log_id)
                .ok_or(DomainError::NotFound)?;
            let linked_order_ref = entry.linked_order_ref.clone().ok_or_else(|| {
                DomainError::MutationRejected(
                    "Cannot update order status: no linked order reference".to_string(),
                )
            })?;
            state.updating.insert(log_id.to_string());
            linked_order_ref
        };

        let result = self
            .authority
            .set_order_status(log_id, status, &linked_order_ref)
            .await;

        let mut state = self.state.write().await;
        state.updating.remove(log_id);
        match &result {
            Ok(()) => {
                if let Some(entry) = state.entries.iter_mut().find(|e| e.id == log_id) {
                    entry.order_status = Some(status);
                }
                tracing::info!("Order status for log {} updated to {}", log_id, status);
            }
            Err(e) => {
                tracing::warn!("Order status update for log {} failed: {}", log_id, e);
            }
        }
        result
    }
}
