//! Demo data seeding for the in-memory store

use chrono::{Duration, Utc};

use crate::infrastructure::MemoryLogStore;
use crate::models::{LogEntry, OrderStatus};

fn entry(
    id: &str,
    minutes_ago: i64,
    from_address: &str,
    file_name: Option<&str>,
    stage: &str,
    status: &str,
    log_lines: &[&str],
) -> LogEntry {
    LogEntry {
        id: id.to_string(),
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        from_address: from_address.to_string(),
        file_name: file_name.map(str::to_string),
        stage: stage.to_string(),
        status: status.to_string(),
        order_status: None,
        linked_order_ref: None,
        log_lines: log_lines.iter().map(|s| s.to_string()).collect(),
    }
}

/// Load a small representative pipeline run into the store so the service is
/// browsable without a remote log store.
pub async fn seed_demo_logs(store: &MemoryLogStore) {
    let mut linked = entry(
        "demo-0001",
        12,
        "orders@acme-supplies.example",
        Some("PO-20417.pdf"),
        "unleashed_sync",
        "success",
        &[
            "Resolved customer 'Acme Supplies'",
            "Sales order created from purchase order PO-20417",
        ],
    );
    linked.linked_order_ref = Some("a4f2c1d8-demo-order".to_string());
    linked.order_status = Some(OrderStatus::Parked);
    store.insert(linked).await;

    store
        .insert_all(vec![
            entry(
                "demo-0002",
                25,
                "orders@acme-supplies.example",
                Some("PO-20417.pdf"),
                "ai_parsing",
                "info",
                &["Extracting line items from attachment"],
            ),
            entry(
                "demo-0003",
                26,
                "orders@acme-supplies.example",
                Some("PO-20417.pdf"),
                "processing_attachments",
                "success",
                &["1 attachment accepted"],
            ),
            entry(
                "demo-0004",
                47,
                "purchasing@northside.example",
                Some("order_march.xlsx"),
                "parse_json_ai_response",
                "error",
                &[
                    "Model response was not valid JSON",
                    "Raw response stored for inspection",
                ],
            ),
            entry(
                "demo-0005",
                48,
                "purchasing@northside.example",
                Some("order_march.xlsx"),
                "processing_email",
                "info",
                &["Email accepted from purchasing@northside.example"],
            ),
            entry(
                "demo-0006",
                90,
                "sales@western-traders.example",
                None,
                "processing_email",
                "error",
                &["No attachments found in message"],
            ),
            entry(
                "demo-0007",
                130,
                "orders@acme-supplies.example",
                Some("PO-20391.pdf"),
                "customer_sync",
                "success",
                &["Customer record already up to date"],
            ),
        ])
        .await;

    tracing::info!("Seeded {} demo log entries", store.len().await);
}
