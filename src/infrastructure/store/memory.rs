//! In-memory log store
//!
//! Evaluates `LogFilter::matches` and the `LogSort` comparator directly over
//! a vector of entries. Backs the demo/dev mode and the integration tests;
//! also acts as its own order-mutation authority the way the real store's
//! edge function does (validate the log, validate the linked order, commit).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::{DomainError, LogFilter, LogPage, LogSort, LogStore, OrderAuthority};
use crate::models::{LogEntry, OrderStatus};

#[derive(Default)]
pub struct MemoryLogStore {
    entries: RwLock<Vec<LogEntry>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entry: LogEntry) {
        self.entries.write().await.push(entry);
    }

    pub async fn insert_all(&self, entries: Vec<LogEntry>) {
        self.entries.write().await.extend(entries);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn query_logs(
        &self,
        filter: &LogFilter,
        sort: &LogSort,
        page: u64,
        page_size: u64,
    ) -> Result<LogPage, DomainError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<LogEntry> = entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        let total = matching.len() as u64;
        let offset = (page.max(1) - 1) * page_size;
        let page_entries = matching
            .into_iter()
            .skip(offset as usize)
            .take(page_size as usize)
            .collect();

        Ok(LogPage {
            entries: page_entries,
            total,
        })
    }

    async fn query_status_counts(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.timestamp >= day_start && e.timestamp <= day_end)
            .map(|e| e.status.clone())
            .collect())
    }
}

#[async_trait]
impl OrderAuthority for MemoryLogStore {
    async fn set_order_status(
        &self,
        log_id: &str,
        status: OrderStatus,
        linked_order_ref: &str,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == log_id)
            .ok_or_else(|| DomainError::MutationRejected("Processing log not found".to_string()))?;

        match &entry.linked_order_ref {
            Some(known) if known == linked_order_ref => {
                entry.order_status = Some(status);
                Ok(())
            }
            Some(_) => Err(DomainError::MutationRejected(
                "Linked order reference does not match".to_string(),
            )),
            None => Err(DomainError::MutationRejected(
                "Cannot update order status: no linked order reference found".to_string(),
            )),
        }
    }
}
