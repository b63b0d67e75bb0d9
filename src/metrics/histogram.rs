use std::time::Duration;

use serde::Serialize;

use super::report::readable;
use crate::format;

/// A bucket in the latency distribution histogram.
///
/// Bounds are inclusive. Bins are contiguous: each bin starts one
/// nanosecond after the previous bin's upper bound, except for the
/// trailing `[max, max]` bins of a range narrower than the bin count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    #[serde(serialize_with = "readable")]
    pub low: Duration,
    #[serde(serialize_with = "readable")]
    pub high: Duration,
    pub count: u64,
}

impl HistogramBin {
    /// `"<low> - <high>"` in report units.
    pub fn label(&self) -> String {
        format!("{} - {}", format::duration(self.low), format::duration(self.high))
    }
}

/// Frequency distribution of a sample window, in ascending bin order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Partition an ascending nanosecond slice into `bin_count` bins.
    ///
    /// Returns the histogram and the bin width. The first bin starts at the
    /// minimum and the last bin always ends exactly at the maximum. Each
    /// value is counted once, in the first bin whose upper bound reaches it.
    /// When all values are equal there is a single `[min, max]` bin of width
    /// zero regardless of `bin_count`.
    ///
    /// When the range is narrower than `bin_count` nanoseconds the width
    /// floors to 1ns and every bin past the one reaching `max` is an empty
    /// `[max, max]` bin overlapping it.
    pub fn from_sorted(sorted: &[u64], bin_count: usize) -> (Self, Duration) {
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return (Self::default(), Duration::ZERO);
        };
        let bin_count = bin_count.max(1);
        let range = max - min;

        if range == 0 {
            let bin = HistogramBin {
                low: Duration::from_nanos(min),
                high: Duration::from_nanos(max),
                count: sorted.len() as u64,
            };
            return (Self { bins: vec![bin] }, Duration::ZERO);
        }

        // Sub-nanosecond widths collapse to 1ns; trailing bins then pin to max.
        let width = (range / bin_count as u64).max(1);

        let mut bounds = Vec::with_capacity(bin_count);
        let mut low = min;
        let mut high = min.saturating_add(width).min(max);
        for i in 0..bin_count {
            if i == bin_count - 1 {
                high = max;
            }
            bounds.push((low, high));
            low = high.saturating_add(1).min(max);
            high = high.saturating_add(width).min(max);
        }

        let mut counts = vec![0u64; bin_count];
        let last = bin_count - 1;
        let mut current = 0;
        for &v in sorted {
            while current < last && v > bounds[current].1 {
                current += 1;
            }
            counts[current] += 1;
        }

        let bins = bounds
            .into_iter()
            .zip(counts)
            .map(|((low, high), count)| HistogramBin {
                low: Duration::from_nanos(low),
                high: Duration::from_nanos(high),
                count,
            })
            .collect();

        (Self { bins }, Duration::from_nanos(width))
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Text bar chart, one line per bin, bars scaled to at most `width` dashes.
    pub fn render(&self, width: usize) -> String {
        if self.bins.is_empty() {
            return String::new();
        }

        let mut min = self.bins.iter().map(|b| b.count).min().unwrap_or(0);
        let max = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        if self.bins.len() == 1 {
            min = 0;
        }

        let mut out = String::new();
        for bin in &self.bins {
            let bar = scale(bin.count as f64, min as f64, max as f64, 1.0, width as f64);
            out.push_str(&format!("{:>22} {}\n", bin.label(), "-".repeat(bar as usize)));
        }
        out
    }
}

/// Map `x` from `[a0, a1]` onto `[b0, b1]`.
fn scale(x: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    let a = x - a0;
    let c = if a == 0.0 { 0.0 } else { a / (a1 - a0) };
    c * (b1 - b0) + b0
}
