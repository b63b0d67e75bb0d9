use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;
use tracing::warn;

use super::summary::Summary;
use crate::AppState;

// ─── GET /api/metrics ────────────────────────────────────────────
/// Returns a single JSON summary (curl / debugging).

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(state.sampler.calc())
}

// ─── GET /api/metrics/stream ─────────────────────────────────────
/// Server-Sent Events endpoint.
/// Pushes a fresh `Summary` as JSON every 500 ms.

pub async fn metrics_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let interval = tokio::time::interval(Duration::from_millis(500));

    let stream = IntervalStream::new(interval).map(move |_| {
        let json = state.sampler.calc().to_json().unwrap_or_else(|e| {
            warn!(error = %e, "failed to encode summary");
            String::new()
        });
        Ok(Event::default().data(json))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
