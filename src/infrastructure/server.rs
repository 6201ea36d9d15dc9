// Server module - router construction and port selection, shared by main and
// the integration tests.

use axum::Router;
use axum::http::HeaderValue;
use std::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::infrastructure::AppState;

/// Build the full application router: API under `/api`, CORS, request
/// tracing. An empty origin list means any origin (dev mode).
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let cors = if cors_allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::error!("Failed to parse CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .nest("/api", api::api_router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port + 1)..(preferred_port + 100))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}
