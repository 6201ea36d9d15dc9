pub mod logs_controller;
pub mod pagination;
pub mod statistics_controller;

pub use logs_controller::{LogListController, LogListState, PAGE_SIZE};
pub use statistics_controller::{StatisticsController, StatisticsState, StatusSlice};
