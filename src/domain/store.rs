//! Collaborator trait definitions
//!
//! These traits define the contract with the external log store and the
//! order-mutation authority. Implementations live in the infrastructure
//! layer; the core never owns or persists store-side data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;
use super::query::{LogFilter, LogSort};
use crate::models::{LogEntry, OrderStatus};

/// One page of query results with the total match count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPage {
    pub entries: Vec<LogEntry>,
    pub total: u64,
}

/// Query capability of the external log store.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Fetch one page of matching entries, sorted per `sort`, plus the total
    /// match count. `page` is 1-based.
    async fn query_logs(
        &self,
        filter: &LogFilter,
        sort: &LogSort,
        page: u64,
        page_size: u64,
    ) -> Result<LogPage, DomainError>;

    /// Fetch the raw status values of every record whose timestamp falls in
    /// the inclusive window. Aggregation happens in-core.
    async fn query_status_counts(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError>;
}

/// Order-mutation authority. Must independently validate the target status
/// and the existence of the linked order before committing; concurrent
/// duplicate requests for the same entry are its problem to keep idempotent.
#[async_trait]
pub trait OrderAuthority: Send + Sync {
    async fn set_order_status(
        &self,
        log_id: &str,
        status: OrderStatus,
        linked_order_ref: &str,
    ) -> Result<(), DomainError>;
}
