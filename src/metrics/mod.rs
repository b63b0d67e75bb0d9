pub(crate) mod calc;
mod report;

pub mod histogram;
pub mod percentiles;
pub mod sampler;
pub mod stream;
pub mod summary;

pub use histogram::{Histogram, HistogramBin};
pub use percentiles::PercentileSet;
pub use sampler::Sampler;
pub use summary::{Summary, TimeStats};
