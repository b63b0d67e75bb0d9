use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use latency_sampler::{load_generator, Sampler, Timeline};
use parking_lot::Mutex;

#[tokio::test]
async fn run_sets_wall_time_and_appends_a_summary() {
    let running = Arc::new(AtomicBool::new(true));
    let sampler = Arc::new(Sampler::new(10_000, 10).unwrap());
    let timeline = Arc::new(Mutex::new(Timeline::new()));

    load_generator::run(
        running.clone(),
        sampler.clone(),
        timeline.clone(),
        4,
        1,
        5,
    )
    .await;

    assert!(!running.load(Ordering::SeqCst));
    assert!(sampler.count() > 0);
    assert!(sampler.wall_time().unwrap() >= Duration::from_secs(1));

    let timeline = timeline.lock();
    assert_eq!(timeline.len(), 1);
    let summary = &timeline.events()[0].summary;
    assert_eq!(summary.count, sampler.count());
    assert!(summary.rate_per_second > 0.0);
}

#[tokio::test]
async fn cleared_flag_stops_workers_immediately() {
    let running = Arc::new(AtomicBool::new(false));
    let sampler = Arc::new(Sampler::new(16, 4).unwrap());
    let timeline = Arc::new(Mutex::new(Timeline::new()));

    load_generator::run(running, sampler.clone(), timeline.clone(), 2, 30, 5).await;

    assert_eq!(sampler.count(), 0);
    assert!(timeline.lock().events()[0].summary.is_empty());
}

#[test]
fn blocking_run_records_every_event() {
    let sampler = Sampler::new(8, 4).unwrap();
    load_generator::run_blocking(&sampler, 12, 1, 7);

    let summary = sampler.calc();
    assert_eq!(summary.count, 12);
    assert_eq!(summary.samples, 8);
}
