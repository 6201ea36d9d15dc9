use chrono::{TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use logdeck::domain::{DateRange, DomainError, LogFilter, LogSort, LogStore, OrderAuthority};
use logdeck::infrastructure::HttpLogStore;
use logdeck::models::OrderStatus;

fn store(server: &MockServer) -> HttpLogStore {
    HttpLogStore::new(server.uri(), "test-key").expect("client")
}

#[tokio::test]
async fn query_logs_sends_filter_sort_and_page_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs"))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "15"))
        .and(query_param("sort_by", "file_name"))
        .and(query_param("ascending", "true"))
        .and(query_param("status", "error"))
        .and(query_param("from_address", "supplier"))
        .and(query_param("start", "2024-03-05T00:00:00Z"))
        .and(query_param("end", "2024-03-05T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{
                "id": "log-1",
                "timestamp": "2024-03-05T10:30:00Z",
                "from_address": "orders@supplier.example",
                "file_name": "PO-1042.pdf",
                "stage": "ai_parsing",
                "status": "error",
                "order_status": null,
                "linked_order_ref": "guid-1",
                "log_lines": ["line one"]
            }],
            "total": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = LogFilter {
        date_range: Some(DateRange {
            start: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap(),
        }),
        from_address: Some("supplier".to_string()),
        status: Some("error".to_string()),
        ..Default::default()
    };
    let sort = LogSort {
        column: logdeck::domain::SortColumn::FileName,
        ascending: true,
    };

    let page = store(&server).query_logs(&filter, &sort, 2, 15).await.unwrap();
    assert_eq!(page.total, 42);
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries[0].id, "log-1");
    assert_eq!(page.entries[0].linked_order_ref.as_deref(), Some("guid-1"));
    assert_eq!(page.entries[0].log_lines, vec!["line one"]);
}

#[tokio::test]
async fn query_logs_maps_store_errors_to_query_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = store(&server)
        .query_logs(&LogFilter::default(), &LogSort::default(), 1, 15)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::QueryFailed(_)));
}

#[tokio::test]
async fn status_counts_returns_raw_status_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/status-counts"))
        .and(query_param("start", "2024-03-05T00:00:00Z"))
        .and(query_param("end", "2024-03-05T23:59:59Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "status": "success" },
            { "status": "success" },
            { "status": "error" }
        ])))
        .mount(&server)
        .await;

    let statuses = store(&server)
        .query_status_counts(
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 59).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(statuses, vec!["success", "success", "error"]);
}

#[tokio::test]
async fn order_mutation_posts_the_confirmed_transition() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/status"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "log_id": "log-1",
            "order_status": "Placed",
            "linked_order_ref": "guid-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    store(&server)
        .set_order_status("log-1", OrderStatus::Placed, "guid-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn authority_refusal_surfaces_its_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/status"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Processing log not found"
        })))
        .mount(&server)
        .await;

    let err = store(&server)
        .set_order_status("missing", OrderStatus::Parked, "guid-1")
        .await
        .unwrap_err();
    match err {
        DomainError::MutationRejected(reason) => {
            assert_eq!(reason, "Processing log not found");
        }
        other => panic!("expected MutationRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn authority_transport_faults_are_mutation_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store(&server)
        .set_order_status("log-1", OrderStatus::Backordered, "guid-1")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::MutationFailed(_)));
}
