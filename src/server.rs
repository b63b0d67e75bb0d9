use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::metrics::stream;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Run control ─────────────────────────────────────────
        .route(
            "/api/benchmark/start",
            post(handlers::benchmark::start_benchmark),
        )
        .route(
            "/api/benchmark/stop",
            post(handlers::benchmark::stop_benchmark),
        )
        .route(
            "/api/benchmark/status",
            get(handlers::benchmark::benchmark_status),
        )
        // ── Metrics ─────────────────────────────────────────────
        .route("/api/metrics", get(stream::get_metrics))
        .route("/api/metrics/stream", get(stream::metrics_stream))
        .route(
            "/api/metrics/reset",
            post(handlers::benchmark::reset_metrics),
        )
        .route("/api/timeline", get(handlers::timeline::get_timeline))
        // ── Provide shared state to all routes above ────────────
        .with_state(state)
        .layer(CorsLayer::permissive())
}
