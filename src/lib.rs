//! Bounded, rolling latency sampling with on-demand statistical summaries.
//!
//! A [`Sampler`] keeps the most recent `capacity` event durations recorded by
//! any number of concurrent producers. [`Sampler::calc`] reduces them into a
//! [`Summary`]: percentiles, mean, harmonic mean, deviation, tail means, a
//! rate and a binned histogram.
//!
//! ```
//! use std::time::Duration;
//! use latency_sampler::Sampler;
//!
//! let sampler = Sampler::new(100, 10).unwrap();
//! for ms in [12, 4, 37, 93] {
//!     sampler.record(Duration::from_millis(ms));
//! }
//!
//! let summary = sampler.calc();
//! assert_eq!(summary.samples, 4);
//! println!("{summary}");
//! ```
//!
//! Summaries can be collected into a [`Timeline`] and written as an HTML
//! page, and the [`server`] module exposes a sampler over HTTP.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod load_generator;
pub mod metrics;
pub mod server;
pub mod timeline;

pub use config::SamplerConfig;
pub use error::{Error, Result};
pub use metrics::{Histogram, HistogramBin, Sampler, Summary, TimeStats};
pub use timeline::Timeline;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Central sampler. Load workers record into it, handlers summarize it.
    pub sampler: Arc<Sampler>,

    /// Final summary of every completed run, oldest first.
    pub timeline: Arc<parking_lot::Mutex<Timeline>>,

    /// Flag checked by every load-generator worker on each iteration.
    pub load_running: Arc<AtomicBool>,

    /// Handle to the spawned load-generator task so we can await clean shutdown.
    pub load_handle: tokio::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl AppState {
    pub fn new(sampler: Sampler) -> Self {
        Self {
            sampler: Arc::new(sampler),
            timeline: Arc::new(parking_lot::Mutex::new(Timeline::new())),
            load_running: Arc::new(AtomicBool::new(false)),
            load_handle: tokio::sync::Mutex::new(None),
        }
    }
}
