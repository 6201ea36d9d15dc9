use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline stages the ingestion backend is known to emit. The store may grow
/// new stages at any time, so `LogEntry::stage` stays an open string; this
/// list only feeds presentation dropdowns.
pub const KNOWN_STAGES: &[&str] = &[
    "processing_email",
    "processing_attachments",
    "ai_parsing",
    "parse_json_ai_response",
    "unleashed_sync",
    "customer_sync",
];

/// A single processing-log record, as projected out of the external log
/// store. Read-only: instances are created per query response and discarded
/// when superseded. The one exception is `order_status`, which is patched in
/// place after a confirmed order-status mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub from_address: String,
    pub file_name: Option<String>,
    pub stage: String,
    /// Outcome status. Normally one of "error" / "info" / "success", but the
    /// store is not required to stick to that set; unmapped values render
    /// with default styling downstream.
    pub status: String,
    pub order_status: Option<OrderStatus>,
    /// Reference to the downstream order entity, when the record is linked to
    /// one. Presence gates whether an order-status mutation is offered.
    pub linked_order_ref: Option<String>,
    #[serde(default)]
    pub log_lines: Vec<String>,
}

/// Closed set of order states the order authority accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Parked,
    Placed,
    Backordered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Parked => "Parked",
            OrderStatus::Placed => "Placed",
            OrderStatus::Backordered => "Backordered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Parked" => Ok(OrderStatus::Parked),
            "Placed" => Ok(OrderStatus::Placed),
            "Backordered" => Ok(OrderStatus::Backordered),
            other => Err(format!(
                "Invalid order status '{}'. Must be one of: Parked, Placed, Backordered",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_through_str() {
        for s in ["Parked", "Placed", "Backordered"] {
            assert_eq!(s.parse::<OrderStatus>().unwrap().as_str(), s);
        }
    }

    #[test]
    fn order_status_rejects_unknown_and_wrong_case() {
        assert!("parked".parse::<OrderStatus>().is_err());
        assert!("Shipped".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }
}
