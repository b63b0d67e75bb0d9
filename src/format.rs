//! Human-readable duration strings used by the text report, JSON output and
//! histogram labels.
//!
//! Values are printed in the largest unit that keeps the integral part
//! non-zero (`ns`, `µs`, `ms`, `s`), with the fraction trimmed of trailing
//! zeros. Durations of a minute or more are split into `h`/`m`/`s` parts,
//! e.g. `1h2m3.5s`.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Formats `d` the way the reports print durations.
pub fn duration(d: Duration) -> String {
    let ns = d.as_nanos();

    match ns {
        0 => "0s".to_string(),
        n if n < NANOS_PER_MICRO => format!("{n}ns"),
        n if n < NANOS_PER_MILLI => scaled(n, NANOS_PER_MICRO, 3, "µs"),
        n if n < NANOS_PER_SEC => scaled(n, NANOS_PER_MILLI, 6, "ms"),
        n if n < NANOS_PER_MIN => scaled(n, NANOS_PER_SEC, 9, "s"),
        n => {
            let hours = n / NANOS_PER_HOUR;
            let minutes = (n % NANOS_PER_HOUR) / NANOS_PER_MIN;
            let rest = n % NANOS_PER_MIN;

            let mut out = String::new();
            if hours > 0 {
                out.push_str(&format!("{hours}h"));
            }
            out.push_str(&format!("{minutes}m"));
            out.push_str(&scaled(rest, NANOS_PER_SEC, 9, "s"));
            out
        }
    }
}

/// `value / unit` with up to `digits` fractional digits, zeros trimmed.
fn scaled(value: u128, unit: u128, digits: usize, suffix: &str) -> String {
    let whole = value / unit;
    let frac = value % unit;

    if frac == 0 {
        return format!("{whole}{suffix}");
    }

    let frac = format!("{frac:0digits$}");
    format!("{whole}.{}{suffix}", frac.trim_end_matches('0'))
}
