use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::metrics::Sampler;
use crate::timeline::Timeline;

// ─── Public entry points ─────────────────────────────────────────

/// Spawns `concurrency` Tokio tasks that each time simulated events of up
/// to `max_delay_ms` into the shared sampler until the deadline or until
/// `running` is cleared.
///
/// The workers overlap in wall time, so the run's elapsed time is set as
/// the sampler's wall time before the final summary is added to `timeline`.
pub async fn run(
    running: Arc<AtomicBool>,
    sampler: Arc<Sampler>,
    timeline: Arc<Mutex<Timeline>>,
    concurrency: u32,
    duration_secs: u64,
    max_delay_ms: u64,
) {
    let start = Instant::now();
    let deadline = start + Duration::from_secs(duration_secs);

    let mut handles = Vec::with_capacity(concurrency as usize);

    for worker_id in 0..concurrency {
        let running = running.clone();
        let sampler = sampler.clone();

        handles.push(tokio::spawn(async move {
            worker(worker_id, running, sampler, deadline, max_delay_ms).await;
        }));
    }

    // Wait for all workers to finish
    for h in handles {
        let _ = h.await;
    }

    sampler.set_wall_time(start.elapsed());
    let summary = sampler.calc();
    info!(
        samples = summary.samples,
        count = summary.count,
        rate_per_second = summary.rate_per_second,
        "load run finished"
    );
    timeline.lock().add_event(summary);

    // Mark run as finished
    running.store(false, Ordering::SeqCst);
}

/// Times `events` sleeps of up to `max_delay_ms` on the calling thread.
pub fn run_blocking(sampler: &Sampler, events: usize, max_delay_ms: u64, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..events {
        let delay = Duration::from_millis(rng.gen_range(0..=max_delay_ms));
        let t0 = Instant::now();
        std::thread::sleep(delay);
        sampler.record(t0.elapsed());
    }
}

// ─── Worker loop ─────────────────────────────────────────────────

async fn worker(
    id: u32,
    running: Arc<AtomicBool>,
    sampler: Arc<Sampler>,
    deadline: Instant,
    max_delay_ms: u64,
) {
    // Each worker gets its own deterministic RNG seeded uniquely.
    let mut rng = StdRng::seed_from_u64(1000 + id as u64);
    let mut events = 0u64;

    while running.load(Ordering::Relaxed) && Instant::now() < deadline {
        let delay = Duration::from_millis(rng.gen_range(0..=max_delay_ms));

        let t0 = Instant::now();
        tokio::time::sleep(delay).await;
        sampler.record(t0.elapsed());

        events += 1;
    }

    debug!(worker = id, events, "worker stopped");
}
