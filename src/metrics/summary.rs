use std::time::Duration;

use serde::Serialize;

use super::histogram::Histogram;
use super::report::readable;

/// Duration statistics selected from the retained sample window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Sum of every retained duration
    #[serde(serialize_with = "readable")]
    pub cumulative: Duration,
    #[serde(serialize_with = "readable")]
    pub hmean: Duration,
    #[serde(serialize_with = "readable")]
    pub avg: Duration,
    #[serde(serialize_with = "readable")]
    pub p50: Duration,
    #[serde(serialize_with = "readable")]
    pub p75: Duration,
    #[serde(serialize_with = "readable")]
    pub p95: Duration,
    #[serde(serialize_with = "readable")]
    pub p99: Duration,
    #[serde(serialize_with = "readable")]
    pub p999: Duration,
    /// Mean of the longest 5% of durations
    #[serde(serialize_with = "readable")]
    pub long_5p: Duration,
    /// Mean of the shortest 5% of durations
    #[serde(serialize_with = "readable")]
    pub short_5p: Duration,
    #[serde(serialize_with = "readable")]
    pub max: Duration,
    #[serde(serialize_with = "readable")]
    pub min: Duration,
    #[serde(serialize_with = "readable")]
    pub std_dev: Duration,
    /// `max - min`
    #[serde(serialize_with = "readable")]
    pub range: Duration,
}

/// Point-in-time reduction of a [`Sampler`](super::Sampler).
///
/// Produced by `Sampler::calc`; holds no reference back to the sampler.
/// `Summary::default()` is the empty-state result: zero samples, zero
/// count and no histogram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub time: TimeStats,

    /// Events per second. Derived from the wall time when one was set,
    /// otherwise from the cumulative duration of the retained samples.
    pub rate_per_second: f64,

    /// Frequency distribution of the retained durations
    pub histogram: Option<Histogram>,

    /// Width of one histogram bin
    #[serde(serialize_with = "readable")]
    pub histogram_bin_size: Duration,

    /// Durations actually reduced: `min(count, capacity)`
    pub samples: usize,

    /// Recordings accepted since construction or the last reset
    pub count: u64,
}

impl Summary {
    /// True for the empty-state result.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}
