use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serializer;

use super::summary::Summary;
use crate::error::Result;
use crate::format;
use crate::timeline::Timeline;

/// Serializes a `Duration` as its report string (`"37ms"`, `"1.32s"`).
pub(crate) fn readable<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&format::duration(*d))
}

impl Summary {
    /// JSON encoding with every duration rendered human-readable.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write this summary alone as a one-event timeline page into `dir`.
    pub fn write_html(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let mut timeline = Timeline::new();
        timeline.add_event(self.clone());
        timeline.write_html(dir)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.time;
        let d = format::duration;

        writeln!(f, "{} samples of {} events", self.samples, self.count)?;
        writeln!(f, "Cumulative:\t{}", d(t.cumulative))?;
        writeln!(f, "HMean:\t\t{}", d(t.hmean))?;
        writeln!(f, "Avg.:\t\t{}", d(t.avg))?;
        writeln!(f, "p50: \t\t{}", d(t.p50))?;
        writeln!(f, "p75:\t\t{}", d(t.p75))?;
        writeln!(f, "p95:\t\t{}", d(t.p95))?;
        writeln!(f, "p99:\t\t{}", d(t.p99))?;
        writeln!(f, "p999:\t\t{}", d(t.p999))?;
        writeln!(f, "Long 5%:\t{}", d(t.long_5p))?;
        writeln!(f, "Short 5%:\t{}", d(t.short_5p))?;
        writeln!(f, "Max:\t\t{}", d(t.max))?;
        writeln!(f, "Min:\t\t{}", d(t.min))?;
        writeln!(f, "Range:\t\t{}", d(t.range))?;
        writeln!(f, "StdDev:\t\t{}", d(t.std_dev))?;
        write!(f, "Rate/sec.:\t{:.2}", self.rate_per_second)
    }
}
