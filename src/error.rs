use thiserror::Error;

/// Result type used across the sampler, report and timeline code.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The ring buffer needs at least one slot.
    #[error("sampler capacity must be greater than zero")]
    InvalidCapacity,

    /// The histogram needs at least one bin.
    #[error("histogram bin count must be greater than zero")]
    InvalidBinCount,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
