use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use super::calc::{self, Snapshot};
use super::summary::Summary;
use crate::config::{SamplerConfig, DEFAULT_BINS};
use crate::error::{Error, Result};

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe rolling sample of event durations.
///
/// Producers call `record()` from any number of threads; a consumer calls
/// `calc()` whenever it wants a [`Summary`] of the most recent `capacity`
/// recordings.
///
/// `record()` never locks: a fetch-and-add on the global counter hands each
/// recording its own slot, `count % capacity`, and the duration is stored
/// there. Once the ring wraps the oldest values are overwritten. A `calc()`
/// racing in-flight recordings may see some slots before they are written;
/// the summary is a point-in-time estimate, not a transaction.
///
/// `reset()` and the snapshot copy inside `calc()` share one lock so a reset
/// can never land between reading the counter and copying the slots. The
/// sort and statistics run after that lock is released.
///
/// The counter is a `u64`; wrapping it takes 2^64 recordings.
#[derive(Debug)]
pub struct Sampler {
    /// Ring of durations in nanoseconds, zero-filled at construction
    slots: Box<[AtomicU64]>,

    /// Every recording accepted since construction or the last reset
    count: AtomicU64,

    /// Externally measured elapsed time in nanoseconds; 0 means unset
    wall_time: AtomicU64,

    /// Histogram bins produced by `calc()`
    bins: usize,

    /// Serializes `reset()` against the snapshot copy in `calc()`
    snapshot_lock: Mutex<()>,
}

// ─── Sampler impl ────────────────────────────────────────────────

impl Sampler {
    /// Creates an empty sampler retaining `capacity` durations and
    /// producing `bins` histogram bins.
    pub fn new(capacity: usize, bins: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        if bins == 0 {
            return Err(Error::InvalidBinCount);
        }

        Ok(Self {
            slots: (0..capacity).map(|_| AtomicU64::new(0)).collect(),
            count: AtomicU64::new(0),
            wall_time: AtomicU64::new(0),
            bins,
            snapshot_lock: Mutex::new(()),
        })
    }

    /// Creates a sampler with the default of ten histogram bins.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DEFAULT_BINS)
    }

    pub fn with_config(config: &SamplerConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.size, config.bins)
    }

    /// Record one event duration. Lock-free; safe from any thread.
    #[inline]
    pub fn record(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let prior = self.count.fetch_add(1, Ordering::AcqRel);
        let index = (prior % self.slots.len() as u64) as usize;
        self.slots[index].store(nanos, Ordering::Release);
    }

    /// Use `elapsed` as the rate denominator instead of the summed durations.
    ///
    /// Meant for concurrent producers whose events overlap in wall time.
    /// Last write wins.
    pub fn set_wall_time(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.wall_time.store(nanos, Ordering::Release);
    }

    /// Logically discard every retained sample for a new measurement epoch.
    ///
    /// Slot contents are left in place; they become unreachable until
    /// overwritten. The wall time is kept.
    pub fn reset(&self) {
        let _guard = self.snapshot_lock.lock();
        self.count.store(0, Ordering::Release);
        trace!("sampler reset");
    }

    /// Summarize the currently retained samples.
    ///
    /// Returns `Summary::default()` when nothing has been recorded.
    pub fn calc(&self) -> Summary {
        if self.count() == 0 {
            return Summary::default();
        }

        calc::summarize(self.snapshot(), self.bins)
    }

    /// Copy the retained slots and counters under the snapshot lock.
    fn snapshot(&self) -> Snapshot {
        let _guard = self.snapshot_lock.lock();

        let count = self.count.load(Ordering::Acquire);
        let samples = count.min(self.slots.len() as u64) as usize;
        let times = self.slots[..samples]
            .iter()
            .map(|slot| slot.load(Ordering::Acquire))
            .collect();

        Snapshot {
            times,
            count,
            wall_time: self.wall_time.load(Ordering::Acquire),
        }
    }

    /// Number of ring slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Histogram bins produced per summary.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Recordings accepted since construction or the last reset.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// The wall time set by `set_wall_time`, if any.
    pub fn wall_time(&self) -> Option<Duration> {
        match self.wall_time.load(Ordering::Acquire) {
            0 => None,
            ns => Some(Duration::from_nanos(ns)),
        }
    }
}
