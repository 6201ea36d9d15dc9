pub mod log_entry;

pub use log_entry::{KNOWN_STAGES, LogEntry, OrderStatus};
