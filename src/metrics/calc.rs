//! Reduction of a sample snapshot into a [`Summary`].
//!
//! Everything here runs on a private copy taken by the sampler, so no
//! synchronization is needed past the snapshot.

use std::time::Duration;

use tracing::debug;

use super::histogram::Histogram;
use super::percentiles::PercentileSet;
use super::summary::{Summary, TimeStats};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Private copy of the sampler state taken under the snapshot lock.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    /// Retained durations in nanoseconds, unsorted
    pub times: Vec<u64>,
    /// Recordings accepted at snapshot time
    pub count: u64,
    /// Externally supplied wall time in nanoseconds, 0 when unset
    pub wall_time: u64,
}

/// Sort the snapshot and compute every statistic plus the histogram.
pub(crate) fn summarize(snapshot: Snapshot, bins: usize) -> Summary {
    let Snapshot {
        mut times,
        count,
        wall_time,
    } = snapshot;

    if times.is_empty() {
        return Summary::default();
    }

    times.sort_unstable();
    let samples = times.len();

    let cumulative: u128 = times.iter().map(|&t| t as u128).sum();
    let min = times[0];
    let max = times[samples - 1];
    let percentiles = PercentileSet::from_sorted(&times);
    let (histogram, bin_size) = Histogram::from_sorted(&times, bins);

    let time = TimeStats {
        cumulative: from_nanos(cumulative),
        hmean: from_nanos_f64(harmonic_mean(&times)),
        avg: from_nanos(cumulative / samples as u128),
        p50: Duration::from_nanos(percentiles.p50),
        p75: Duration::from_nanos(percentiles.p75),
        p95: Duration::from_nanos(percentiles.p95),
        p99: Duration::from_nanos(percentiles.p99),
        p999: Duration::from_nanos(percentiles.p999),
        long_5p: Duration::from_nanos(percentiles.long_5p),
        short_5p: Duration::from_nanos(percentiles.short_5p),
        max: Duration::from_nanos(max),
        min: Duration::from_nanos(min),
        std_dev: from_nanos_f64(std_dev(&times, cumulative)),
        range: Duration::from_nanos(max - min),
    };

    let rate_per_second = rate_per_second(count, samples, cumulative, wall_time);

    debug!(
        samples,
        count,
        bins = histogram.len(),
        rate_per_second,
        "summarized sample window"
    );

    Summary {
        time,
        rate_per_second,
        histogram: Some(histogram),
        histogram_bin_size: bin_size,
        samples,
        count,
    }
}

/// Events per second.
///
/// With a wall time set this is `count / wall_time`, which stays honest when
/// concurrent producers overlap. Otherwise `samples / cumulative`. A zero
/// denominator yields 0.
fn rate_per_second(count: u64, samples: usize, cumulative: u128, wall_time: u64) -> f64 {
    let (events, elapsed) = if wall_time != 0 {
        (count as f64, wall_time as f64)
    } else {
        (samples as f64, cumulative as f64)
    };

    if elapsed == 0.0 {
        return 0.0;
    }
    events / elapsed * 1e9
}

/// `n / Σ(1/t)`; any zero duration drives this to 0.
fn harmonic_mean(times: &[u64]) -> f64 {
    let reciprocals: f64 = times.iter().map(|&t| 1.0 / t as f64).sum();
    times.len() as f64 / reciprocals
}

/// Population standard deviation around the arithmetic mean.
fn std_dev(times: &[u64], cumulative: u128) -> f64 {
    let n = times.len() as f64;
    let mean = cumulative as f64 / n;
    let squares: f64 = times
        .iter()
        .map(|&t| {
            let dev = t as f64 - mean;
            dev * dev
        })
        .sum();
    (squares / n).sqrt()
}

fn from_nanos(ns: u128) -> Duration {
    let secs = u64::try_from(ns / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (ns % NANOS_PER_SEC) as u32)
}

/// Truncates to whole nanoseconds; NaN and negatives become zero.
fn from_nanos_f64(ns: f64) -> Duration {
    Duration::from_nanos(ns as u64)
}
