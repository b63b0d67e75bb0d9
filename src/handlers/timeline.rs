use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::AppState;

use super::AppError;

// ─── GET /api/timeline ───────────────────────────────────────────
/// One chart per completed run, oldest first.

pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let html = state.timeline.lock().render_html()?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sampler;
    use std::time::Duration;

    #[tokio::test]
    async fn renders_completed_runs() {
        let state = Arc::new(AppState::new(Sampler::new(16, 4).unwrap()));
        state.sampler.record(Duration::from_millis(8));
        state.timeline.lock().add_event(state.sampler.calc());

        let Html(page) = get_timeline(State(state)).await.unwrap();
        assert!(page.contains("canvas-0"));
        assert!(page.contains("1 samples of 1 events"));
    }
}
