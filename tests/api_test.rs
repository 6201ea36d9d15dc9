use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

use logdeck::infrastructure::{AppState, MemoryLogStore};
use logdeck::{seed, server};

async fn setup_app() -> Router {
    let store = Arc::new(MemoryLogStore::new());
    seed::seed_demo_logs(&store).await;
    let state = AppState::new(store.clone(), store);
    state.logs.refresh().await;
    state.statistics.refresh().await;
    server::build_router(state, &[])
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_service_and_version() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "logdeck");
}

#[tokio::test]
async fn stage_vocabulary_is_published() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/logs/stages")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let stages = body["stages"].as_array().unwrap();
    assert!(stages.iter().any(|s| s == "ai_parsing"));
    assert!(stages.iter().any(|s| s == "unleashed_sync"));
}

#[tokio::test]
async fn log_list_snapshot_exposes_entries_and_paging() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/logs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 7);
    assert_eq!(body["current_page"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["entries"].as_array().unwrap().len(), 7);
    assert_eq!(body["loading"], false);
    assert_eq!(body["sort"]["column"], "timestamp");
    assert_eq!(body["sort"]["ascending"], false);
}

#[tokio::test]
async fn filters_narrow_and_clear_restores() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/logs/filters",
            json!({ "status": "error" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["filter"]["status"], "error");

    // The filter belongs to shared controller state, so a fresh request
    // observes it too; clearing restores the full set.
    let response = app
        .clone()
        .oneshot(Request::builder()
            .method("DELETE")
            .uri("/api/logs/filters")
            .body(Body::empty())
            .unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 7);
    assert_eq!(body["filter"]["status"], Value::Null);
}

#[tokio::test]
async fn null_clears_a_single_filter_field_over_the_wire() {
    let app = setup_app().await;

    // Two independent filters: demo-0004 is the one error from
    // purchasing@northside.example.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/logs/filters",
            json!({ "status": "error", "from_address": "northside" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);

    // Clearing one field must not touch the other.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/logs/filters",
            json!({ "status": null }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["filter"]["status"], Value::Null);
    assert_eq!(body["filter"]["from_address"], "northside");
    assert_eq!(body["total"], 2);
    assert_eq!(body["current_page"], 1);
}

#[tokio::test]
async fn sort_toggle_follows_the_toggle_rule() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/logs/sort", json!({ "column": "status" })))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["sort"]["column"], "status");
    assert_eq!(body["sort"]["ascending"], false);
    assert_eq!(body["current_page"], 1);

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/logs/sort", json!({ "column": "status" })))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["sort"]["ascending"], true);
}

#[tokio::test]
async fn invalid_order_status_is_a_bad_request() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs/demo-0001/order-status",
            json!({ "status": "Shipped" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid order status"));
}

#[tokio::test]
async fn confirmed_order_mutation_shows_up_in_the_snapshot() {
    let app = setup_app().await;

    // demo-0001 is the seeded entry with a linked order reference.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/logs/demo-0001/order-status",
            json!({ "status": "Placed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/logs")).await.unwrap();
    let body = body_json(response).await;
    let entry = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"] == "demo-0001")
        .unwrap();
    assert_eq!(entry["order_status"], "Placed");
}

#[tokio::test]
async fn mutation_on_an_unlinked_entry_is_rejected() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs/demo-0002/order-status",
            json!({ "status": "Placed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn statistics_snapshot_covers_the_selected_day() {
    let app = setup_app().await;

    // The demo data all lands within the last few hours, i.e. today or
    // yesterday around midnight; selecting a far-past day must be empty.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/statistics/day",
            json!({ "day": "2000-01-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_logs"], 0);
    assert_eq!(body["status_breakdown"].as_array().unwrap().len(), 0);
    assert_eq!(body["error"], Value::Null);
}
