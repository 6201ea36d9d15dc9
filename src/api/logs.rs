use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{DomainError, LogFilterUpdate, SortColumn};
use crate::infrastructure::AppState;
use crate::models::KNOWN_STAGES;
use crate::services::LogListState;

pub async fn get_state(State(state): State<AppState>) -> Json<LogListState> {
    Json(state.logs.snapshot().await)
}

/// Stage vocabulary for the filter dropdown.
pub async fn list_stages() -> Json<serde_json::Value> {
    Json(json!({ "stages": KNOWN_STAGES }))
}

pub async fn refresh(State(state): State<AppState>) -> Json<LogListState> {
    state.logs.refresh().await;
    Json(state.logs.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct SetPageBody {
    pub page: u64,
}

pub async fn set_page(
    State(state): State<AppState>,
    Json(body): Json<SetPageBody>,
) -> Json<LogListState> {
    state.logs.set_page(body.page).await;
    Json(state.logs.snapshot().await)
}

pub async fn update_filters(
    State(state): State<AppState>,
    Json(update): Json<LogFilterUpdate>,
) -> Json<LogListState> {
    state.logs.update_filter(update).await;
    Json(state.logs.snapshot().await)
}

pub async fn clear_filters(State(state): State<AppState>) -> Json<LogListState> {
    state.logs.clear_filters().await;
    Json(state.logs.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct ToggleSortBody {
    pub column: SortColumn,
}

pub async fn toggle_sort(
    State(state): State<AppState>,
    Json(body): Json<ToggleSortBody>,
) -> Json<LogListState> {
    state.logs.toggle_sort(body.column).await;
    Json(state.logs.snapshot().await)
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusBody {
    pub status: String,
}

pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<OrderStatusBody>,
) -> impl IntoResponse {
    match state.logs.set_order_status(&id, &body.status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": format!("Order status updated to {}", body.status)
            })),
        )
            .into_response(),
        Err(e) => {
            let code = match &e {
                DomainError::MutationRejected(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound => StatusCode::NOT_FOUND,
                DomainError::MutationFailed(_) => StatusCode::BAD_GATEWAY,
                DomainError::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (code, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}
