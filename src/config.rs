use serde::Deserialize;

use crate::error::{Error, Result};

/// Histogram bin count used when none is configured.
pub const DEFAULT_BINS: usize = 10;

/// Ring capacity used when none is configured.
pub const DEFAULT_SIZE: usize = 50;

/// Construction parameters for a [`Sampler`](crate::metrics::Sampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SamplerConfig {
    /// Number of ring slots, i.e. how many recent durations are retained
    #[serde(default = "default_size")]
    pub size: usize,

    /// Number of histogram bins produced by `calc`
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}
fn default_bins() -> usize {
    DEFAULT_BINS
}

impl SamplerConfig {
    pub fn new(size: usize, bins: usize) -> Self {
        Self { size, bins }
    }

    /// Rejects zero-sized rings and zero-bin histograms.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidCapacity);
        }
        if self.bins == 0 {
            return Err(Error::InvalidBinCount);
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            bins: DEFAULT_BINS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SamplerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SamplerConfig::default());

        let cfg: SamplerConfig = serde_json::from_str(r#"{"size": 30}"#).unwrap();
        assert_eq!(cfg.size, 30);
        assert_eq!(cfg.bins, DEFAULT_BINS);
    }

    #[test]
    fn rejects_zero_values() {
        assert!(matches!(
            SamplerConfig::new(0, 10).validate(),
            Err(Error::InvalidCapacity)
        ));
        assert!(matches!(
            SamplerConfig::new(10, 0).validate(),
            Err(Error::InvalidBinCount)
        ));
        assert!(SamplerConfig::new(1, 1).validate().is_ok());
    }
}
