//! Same-day outcome statistics
//!
//! Independently queries the store for a single calendar day and aggregates
//! the raw status values into grouped counts with integer percentages. Runs
//! in its own failure domain: a statistics failure never touches the log
//! list, and vice versa. Day selection changes follow the same
//! generation-token discard rule as the list controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::domain::LogStore;

/// One status group of the day's breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub status: String,
    pub count: u64,
    pub percentage: u32,
}

/// Latest-applied snapshot for the statistics view.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsState {
    pub selected_day: NaiveDate,
    pub total_logs: u64,
    pub status_breakdown: Vec<StatusSlice>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct StatisticsController {
    store: Arc<dyn LogStore>,
    generation: AtomicU64,
    state: RwLock<StatisticsState>,
}

impl StatisticsController {
    /// Starts on today's date (store timezone, UTC) with nothing loaded yet.
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            state: RwLock::new(StatisticsState {
                selected_day: Utc::now().date_naive(),
                total_logs: 0,
                status_breakdown: Vec::new(),
                loading: false,
                error: None,
            }),
        }
    }

    pub async fn snapshot(&self) -> StatisticsState {
        self.state.read().await.clone()
    }

    /// Switch to another day and query it. No caching across days.
    pub async fn select_day(&self, day: NaiveDate) {
        {
            let mut state = self.state.write().await;
            state.selected_day = day;
        }
        self.fetch().await;
    }

    /// Re-query the currently selected day. Also the retry path.
    pub async fn refresh(&self) {
        self.fetch().await;
    }

    async fn fetch(&self) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let day = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.selected_day
        };

        // Inclusive 00:00:00 .. 23:59:59 window of the selected day.
        let day_start = day.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::seconds(24 * 60 * 60 - 1);

        tracing::debug!("Querying status counts for {}", day);
        let result = self.store.query_status_counts(day_start, day_end).await;

        let mut state = self.state.write().await;
        if token != self.generation.load(Ordering::SeqCst) {
            tracing::debug!("Discarding stale statistics response for {}", day);
            return;
        }

        match result {
            Ok(statuses) => {
                state.total_logs = statuses.len() as u64;
                state.status_breakdown = breakdown(&statuses);
                state.loading = false;
            }
            Err(e) => {
                tracing::warn!("Statistics query failed: {}", e);
                state.loading = false;
                state.error = Some(e.to_string());
            }
        }
    }
}

/// Group raw status values into counts and integer percentages, ordered by
/// count descending. The stable sort keeps first-seen order across equal
/// counts. Percentages are rounded independently and may sum to != 100;
/// accepted, not corrected. Zero records yields an empty breakdown.
pub fn breakdown(statuses: &[String]) -> Vec<StatusSlice> {
    let total = statuses.len();
    if total == 0 {
        return Vec::new();
    }

    // First-seen order; the status vocabulary is tiny, a scan beats a map.
    let mut counts: Vec<(String, u64)> = Vec::new();
    for status in statuses {
        match counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, n)) => *n += 1,
            None => counts.push((status.clone(), 1)),
        }
    }

    let mut slices: Vec<StatusSlice> = counts
        .into_iter()
        .map(|(status, count)| StatusSlice {
            status,
            count,
            percentage: (count as f64 / total as f64 * 100.0).round() as u32,
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}
