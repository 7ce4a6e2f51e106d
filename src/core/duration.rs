//! Duration parsing and formatting.
//!
//! Cycle lengths are given on the command line and in the config file as
//! milliseconds by default (`7500`), or with a unit (`7500ms`, `7.5s`, `1m`).

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(ms|s|m)?$")
        .unwrap_or_else(|e| panic!("Invalid duration regex: {e}"))
});

/// Parse a duration string like "7500", "7500ms", "7.5s" or "1m".
///
/// A bare number is milliseconds. Returns `None` for malformed or zero
/// durations.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();
    let caps = DURATION_PATTERN.captures(&s)?;

    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let millis = match caps.get(2).map(|m| m.as_str()) {
        None | Some("ms") => value,
        Some("s") => value * 1000.0,
        Some("m") => value * 60_000.0,
        Some(_) => return None,
    };

    let millis = millis.round();
    if millis < 1.0 || !millis.is_finite() {
        return None;
    }
    Some(Duration::from_millis(millis as u64))
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as MM:SS.mmm.
#[must_use]
pub fn format_duration_precise(d: Duration) -> String {
    format!("{}.{:03}", format_duration_mmss(d), d.subsec_millis())
}

/// Format a duration as a short human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();

    if millis < 1000 {
        return format!("{millis}ms");
    }

    if millis % 1000 == 0 {
        let seconds = d.as_secs();
        if seconds >= 60 && seconds % 60 == 0 {
            let minutes = seconds / 60;
            return format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" });
        }
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    format!("{:.1}s", d.as_secs_f64())
}
