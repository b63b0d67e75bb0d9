use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::AppState;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of concurrent Tokio tasks producing events
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    /// How long the run lasts (seconds)
    #[serde(default = "default_duration")]
    pub duration_secs: u64,

    /// Upper bound of each simulated event's duration (milliseconds)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_concurrency() -> u32 {
    10
}
fn default_duration() -> u64 {
    10
}
fn default_max_delay() -> u64 {
    30
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.concurrency == 0 || self.concurrency > 500 {
            return Err(AppError::BadRequest(
                "concurrency must be between 1 and 500".into(),
            ));
        }
        if self.duration_secs == 0 || self.duration_secs > 300 {
            return Err(AppError::BadRequest(
                "duration_secs must be between 1 and 300".into(),
            ));
        }
        if self.max_delay_ms == 0 || self.max_delay_ms > 10_000 {
            return Err(AppError::BadRequest(
                "max_delay_ms must be between 1 and 10000".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BenchmarkStatus {
    pub running: bool,
    pub message: String,
    /// Recordings accepted by the sampler in the current epoch
    pub recorded: u64,
    /// Ring slots, i.e. the most samples a summary can hold
    pub capacity: usize,
}

impl BenchmarkStatus {
    fn new(state: &AppState, running: bool, message: impl Into<String>) -> Self {
        Self {
            running,
            message: message.into(),
            recorded: state.sampler.count(),
            capacity: state.sampler.capacity(),
        }
    }
}

// ─── POST /api/benchmark/start ───────────────────────────────────

pub async fn start_benchmark(
    State(state): State<Arc<AppState>>,
    Json(config): Json<BenchmarkConfig>,
) -> Result<Json<BenchmarkStatus>, AppError> {
    config.validate()?;

    // Claim the run slot; only one run at a time
    if state
        .load_running
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(AppError::AlreadyRunning);
    }

    // New measurement epoch; the previous run's wall time no longer applies
    state.sampler.reset();
    state.sampler.set_wall_time(Duration::ZERO);

    let msg = format!(
        "Started: {} workers × {}s, events up to {}ms",
        config.concurrency, config.duration_secs, config.max_delay_ms,
    );
    info!(?config, "starting load run");

    let running = state.load_running.clone();
    let sampler = state.sampler.clone();
    let timeline = state.timeline.clone();

    let handle = tokio::spawn(async move {
        crate::load_generator::run(
            running,
            sampler,
            timeline,
            config.concurrency,
            config.duration_secs,
            config.max_delay_ms,
        )
        .await;
    });

    // Stash the handle so `stop` can await clean shutdown
    let mut guard = state.load_handle.lock().await;
    *guard = Some(handle);

    Ok(Json(BenchmarkStatus::new(&state, true, msg)))
}

// ─── POST /api/benchmark/stop ────────────────────────────────────

pub async fn stop_benchmark(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BenchmarkStatus>, AppError> {
    if !state.load_running.load(Ordering::SeqCst) {
        return Ok(Json(BenchmarkStatus::new(
            &state,
            false,
            "No benchmark is running",
        )));
    }

    // Signal all workers to stop
    state.load_running.store(false, Ordering::SeqCst);

    let mut guard = state.load_handle.lock().await;
    if let Some(handle) = guard.take() {
        // JoinError is ignored; the task may have already finished
        let _ = handle.await;
    }

    Ok(Json(BenchmarkStatus::new(&state, false, "Benchmark stopped")))
}

// ─── GET /api/benchmark/status ───────────────────────────────────

pub async fn benchmark_status(
    State(state): State<Arc<AppState>>,
) -> Json<BenchmarkStatus> {
    let running = state.load_running.load(Ordering::SeqCst);
    let message = if running { "Benchmark in progress" } else { "Idle" };
    Json(BenchmarkStatus::new(&state, running, message))
}

// ─── POST /api/metrics/reset ─────────────────────────────────────

pub async fn reset_metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BenchmarkStatus>, AppError> {
    if state.load_running.load(Ordering::SeqCst) {
        return Err(AppError::AlreadyRunning);
    }

    state.sampler.reset();
    state.sampler.set_wall_time(Duration::ZERO);

    Ok(Json(BenchmarkStatus::new(&state, false, "Sampler reset")))
}
