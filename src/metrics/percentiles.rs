use serde::Serialize;

/// Nearest-rank percentiles and tail means of one sorted sample window.
///
/// All values are nanoseconds selected (or averaged) from the sample
/// itself; nothing is interpolated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PercentileSet {
    pub p50: u64,
    pub p75: u64,
    pub p95: u64,
    pub p99: u64,
    pub p999: u64,
    pub long_5p: u64,
    pub short_5p: u64,
}

impl PercentileSet {
    /// Extract a full percentile set from an ascending slice.
    /// Returns zeroed values if the slice is empty.
    pub fn from_sorted(sorted: &[u64]) -> Self {
        if sorted.is_empty() {
            return Self::default();
        }

        Self {
            p50: percentile(sorted, 0.50),
            p75: percentile(sorted, 0.75),
            p95: percentile(sorted, 0.95),
            p99: percentile(sorted, 0.99),
            p999: percentile(sorted, 0.999),
            long_5p: long_tail_mean(sorted),
            short_5p: short_tail_mean(sorted),
        }
    }
}

/// `floor(samples * p + 0.5)`, never more than `samples`.
fn rank(samples: usize, p: f64) -> usize {
    let rank = (samples as f64 * p + 0.5).floor() as usize;
    rank.min(samples)
}

/// 0-based index of the `p` percentile: `rank - 1` clamped into the slice.
pub fn index(samples: usize, p: f64) -> usize {
    rank(samples, p).saturating_sub(1).min(samples.saturating_sub(1))
}

/// Value at the `p` percentile of a non-empty ascending slice.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    sorted[index(sorted.len(), p)]
}

/// Mean of the top 5%, or the maximum when that slice holds at most one value.
pub fn long_tail_mean(sorted: &[u64]) -> u64 {
    let tail = &sorted[rank(sorted.len(), 0.95)..];
    if tail.len() <= 1 {
        return sorted[sorted.len() - 1];
    }
    mean(tail)
}

/// Mean of the bottom 5%, or the minimum when that slice holds at most one value.
pub fn short_tail_mean(sorted: &[u64]) -> u64 {
    let head = &sorted[..rank(sorted.len(), 0.05)];
    if head.len() <= 1 {
        return sorted[0];
    }
    mean(head)
}

fn mean(values: &[u64]) -> u64 {
    let total: u128 = values.iter().map(|&v| v as u128).sum();
    (total / values.len() as u128) as u64
}
