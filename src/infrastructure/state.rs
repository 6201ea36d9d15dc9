//! Application state containing the view controllers

use std::sync::Arc;

use crate::domain::{LogStore, OrderAuthority};
use crate::services::{LogListController, StatisticsController};

/// Shared across all handlers. One controller per view: the log list and the
/// same-day statistics each own their latest-applied snapshot, nothing lives
/// at module scope.
#[derive(Clone)]
pub struct AppState {
    pub logs: Arc<LogListController>,
    pub statistics: Arc<StatisticsController>,
}

impl AppState {
    pub fn new(store: Arc<dyn LogStore>, authority: Arc<dyn OrderAuthority>) -> Self {
        Self {
            logs: Arc::new(LogListController::new(store.clone(), authority)),
            statistics: Arc::new(StatisticsController::new(store)),
        }
    }
}
