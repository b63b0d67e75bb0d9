use std::sync::Arc;
use std::thread;
use std::time::Duration;

use latency_sampler::{Sampler, Summary};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// 32 events into a 30-slot sampler; the first two are overwritten.
fn reference_sampler() -> Sampler {
    let sampler = Sampler::new(30, 10).unwrap();

    sampler.record(ms(12));
    sampler.record(ms(96));

    for _ in 0..2 {
        for v in [9, 4, 88, 37, 42, 77, 93, 89, 12, 36, 54, 21, 17, 14, 67] {
            sampler.record(ms(v));
        }
    }
    sampler
}

// ─── Capacity and wraparound ─────────────────────────────────────

#[test]
fn retains_every_recording_below_capacity() {
    let sampler = Sampler::new(10, 5).unwrap();
    for v in 1..=7 {
        sampler.record(ms(v));
    }

    let summary = sampler.calc();
    assert_eq!(summary.samples, 7);
    assert_eq!(summary.count, 7);
}

#[test]
fn wraps_and_keeps_the_most_recent_values() {
    let sampler = Sampler::new(5, 5).unwrap();
    for v in 1..=12 {
        sampler.record(ms(v));
    }

    let summary = sampler.calc();
    assert_eq!(summary.samples, 5);
    assert_eq!(summary.count, 12);
    // 8..=12 survive
    assert_eq!(summary.time.min, ms(8));
    assert_eq!(summary.time.max, ms(12));
    assert_eq!(summary.time.cumulative, ms(50));
}

// ─── Reference statistics ────────────────────────────────────────

#[test]
fn reference_sample_statistics() {
    let summary = reference_sampler().calc();

    assert_eq!(summary.samples, 30);
    assert_eq!(summary.count, 32);
    assert_eq!(summary.time.cumulative, ms(1_320));
    assert_eq!(summary.time.avg, ms(44));
    assert_eq!(summary.time.p50, ms(37));
    assert_eq!(summary.time.p75, ms(77));
    assert_eq!(summary.time.p95, ms(93));
    assert_eq!(summary.time.p99, ms(93));
    assert_eq!(summary.time.p999, ms(93));
    assert_eq!(summary.time.long_5p, ms(93));
    assert_eq!(summary.time.short_5p, ms(4));
    assert_eq!(summary.time.max, ms(93));
    assert_eq!(summary.time.min, ms(4));
    assert_eq!(summary.time.range, ms(89));
}

#[test]
fn reference_sample_rate_uses_cumulative_time() {
    let summary = reference_sampler().calc();
    // 30 samples over 1.32s of summed durations
    assert!((summary.rate_per_second - 22.727).abs() < 1e-3);
}

#[test]
fn wall_time_overrides_cumulative_rate() {
    let sampler = reference_sampler();
    sampler.set_wall_time(Duration::from_secs(2));

    let summary = sampler.calc();
    // 32 events over 2s
    assert!((summary.rate_per_second - 16.0).abs() < 1e-9);
}

#[test]
fn harmonic_mean_and_deviation_are_populated() {
    let summary = reference_sampler().calc();

    assert!(summary.time.hmean > ms(4));
    assert!(summary.time.hmean < summary.time.avg);
    assert!(summary.time.std_dev > Duration::ZERO);
    assert!(summary.time.std_dev < summary.time.range);
}

// ─── Histogram ───────────────────────────────────────────────────

#[test]
fn histogram_covers_every_sample() {
    let summary = reference_sampler().calc();
    let histogram = summary.histogram.as_ref().unwrap();

    assert_eq!(histogram.len(), 10);
    assert_eq!(histogram.total(), 30);
    assert_eq!(histogram.bins()[0].low, summary.time.min);
    assert_eq!(histogram.bins()[9].high, summary.time.max);
    assert_eq!(summary.histogram_bin_size, Duration::from_micros(8_900));
}

#[test]
fn identical_durations_produce_one_bin() {
    let sampler = Sampler::new(8, 10).unwrap();
    for _ in 0..8 {
        sampler.record(ms(5));
    }

    let summary = sampler.calc();
    let histogram = summary.histogram.as_ref().unwrap();
    assert_eq!(histogram.len(), 1);
    assert_eq!(histogram.total(), 8);
    assert_eq!(summary.time.range, Duration::ZERO);
    assert_eq!(summary.time.std_dev, Duration::ZERO);
}

#[test]
fn single_sample_summary() {
    let sampler = Sampler::new(8, 10).unwrap();
    sampler.record(ms(3));

    let summary = sampler.calc();
    assert_eq!(summary.samples, 1);
    assert_eq!(summary.time.p50, ms(3));
    assert_eq!(summary.time.p999, ms(3));
    assert_eq!(summary.time.long_5p, ms(3));
    assert_eq!(summary.time.short_5p, ms(3));
    assert_eq!(summary.histogram.as_ref().unwrap().len(), 1);
}

// ─── Empty state, idempotence, reset ─────────────────────────────

#[test]
fn fresh_sampler_is_empty() {
    let summary = Sampler::new(4, 10).unwrap().calc();

    assert_eq!(summary, Summary::default());
    assert_eq!(summary.samples, 0);
    assert_eq!(summary.count, 0);
    assert!(summary.histogram.is_none());
    assert!(summary.is_empty());
}

#[test]
fn calc_is_idempotent() {
    let sampler = reference_sampler();
    sampler.set_wall_time(Duration::from_millis(750));

    let first = sampler.calc();
    let second = sampler.calc();
    assert_eq!(first, second);
    assert_eq!(
        first.rate_per_second.to_bits(),
        second.rate_per_second.to_bits()
    );
}

#[test]
fn reset_returns_to_the_empty_state() {
    let sampler = reference_sampler();
    sampler.reset();

    let summary = sampler.calc();
    assert_eq!(summary.count, 0);
    assert!(summary.histogram.is_none());

    sampler.record(ms(7));
    let summary = sampler.calc();
    assert_eq!(summary.samples, 1);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.time.max, ms(7));
}

// ─── Concurrency ─────────────────────────────────────────────────

#[test]
fn concurrent_recordings_are_all_counted() {
    let sampler = Arc::new(Sampler::new(1_000, 10).unwrap());
    let mut handles = vec![];

    for t in 0..8u64 {
        let sampler = Arc::clone(&sampler);
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                sampler.record(Duration::from_micros(t * 1_000 + i));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = sampler.calc();
    assert_eq!(summary.count, 4_000);
    assert_eq!(summary.samples, 1_000);
    assert_eq!(summary.histogram.as_ref().unwrap().total(), 1_000);
}

#[test]
fn calc_and_reset_race_without_panicking() {
    let sampler = Arc::new(Sampler::new(64, 8).unwrap());

    let writer = {
        let sampler = Arc::clone(&sampler);
        thread::spawn(move || {
            for i in 0..20_000u64 {
                sampler.record(Duration::from_nanos(i % 977 + 1));
            }
        })
    };
    let resetter = {
        let sampler = Arc::clone(&sampler);
        thread::spawn(move || {
            for _ in 0..200 {
                sampler.reset();
                thread::yield_now();
            }
        })
    };

    for _ in 0..200 {
        let summary = sampler.calc();
        assert!(summary.samples <= 64);
        assert!(summary.samples as u64 <= summary.count);
        if let Some(histogram) = &summary.histogram {
            assert_eq!(histogram.total(), summary.samples as u64);
        }
    }

    writer.join().unwrap();
    resetter.join().unwrap();
}
