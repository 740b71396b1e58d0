//! Recency filtering, averaging, and status classification.
//!
//! Everything here is a pure function of the readings and the
//! evaluation time. Dropping a stale or absent reading is normal
//! filtering, not an error; the only non-value outcome is `None`
//! (no data), which must never be conflated with an average of 0.0.

use chrono::Duration;

use crate::types::{
    AggregateResult, Source, StationReading, TempStatus, Timestamp, RECENCY_WINDOW_SECS,
};

/// Sensor titles accepted as temperature-bearing, compared
/// case-insensitively. openSenseMap boxes use both the English and
/// German spelling.
pub const TEMPERATURE_TITLES: &[&str] = &["temperature", "temperatur"];

/// Whether a sensor title identifies a temperature sensor.
pub fn is_temperature_sensor(title: &str) -> bool {
    TEMPERATURE_TITLES
        .iter()
        .any(|t| title.eq_ignore_ascii_case(t))
}

/// Keep only readings observed within the trailing recency window
/// (`observed_at >= now - 1h`).
pub fn filter_recent(readings: &[StationReading], now: Timestamp) -> Vec<&StationReading> {
    let cutoff = now - Duration::seconds(RECENCY_WINDOW_SECS);
    readings.iter().filter(|r| r.observed_at >= cutoff).collect()
}

/// Classify an average temperature into its status band.
///
/// Normative rule: `< 10` is too cold, `10..=36` is good, `> 36` is
/// too hot. Total over all finite inputs.
pub fn classify(average: f64) -> TempStatus {
    if average < 10.0 {
        TempStatus::TooCold
    } else if average <= 36.0 {
        TempStatus::Good
    } else {
        TempStatus::TooHot
    }
}

/// Compute the aggregate over the in-window subset of `readings`.
///
/// Returns `None` when no reading survives the recency filter. Every
/// accepted reading contributes equally regardless of its age within
/// the window. The result is tagged [`Source::Live`]; the cache
/// gateway re-tags values it serves from the cache.
pub fn summarize(readings: &[StationReading], now: Timestamp) -> Option<AggregateResult> {
    let accepted = filter_recent(readings, now);
    if accepted.is_empty() {
        return None;
    }

    let sum: f64 = accepted.iter().map(|r| r.value).sum();
    let average = sum / accepted.len() as f64;

    Some(AggregateResult {
        average,
        status: classify(average),
        computed_at: now,
        source: Source::Live,
    })
}
