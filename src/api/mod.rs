pub mod health;
pub mod logs;
pub mod statistics;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Log list: state snapshot plus the mutator operations
        .route("/logs", get(logs::get_state))
        .route("/logs/stages", get(logs::list_stages))
        .route("/logs/refresh", post(logs::refresh))
        .route("/logs/page", put(logs::set_page))
        .route(
            "/logs/filters",
            put(logs::update_filters).delete(logs::clear_filters),
        )
        .route("/logs/sort", put(logs::toggle_sort))
        .route("/logs/:id/order-status", post(logs::set_order_status))
        // Same-day statistics
        .route("/statistics", get(statistics::get_state))
        .route("/statistics/day", put(statistics::select_day))
        .route("/statistics/refresh", post(statistics::refresh))
        .with_state(state)
}
