//! Domain value objects shared across the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Cache key holding the last computed average, serialized as a float
/// string.
pub const KEY_AVERAGE_TEMPERATURE: &str = "average_temperature";

/// Cache key holding the Unix epoch seconds of the last live refresh.
/// Written without a TTL; overwritten on each refresh.
pub const KEY_CACHE_TIMESTAMP: &str = "temperature_cache_timestamp";

/// Time-to-live for the cached average, in seconds.
pub const CACHE_TTL_SECS: u64 = 300;

/// Trailing window within which a station reading counts as current.
pub const RECENCY_WINDOW_SECS: i64 = 3600;

/// Maximum age of the freshness marker before the cache is considered
/// stale by the readiness probe.
pub const FRESHNESS_THRESHOLD_SECS: i64 = 300;

/// One temperature measurement taken from a station's sensor list.
///
/// Readings with missing or unparseable timestamps are discarded at
/// the client boundary and never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct StationReading {
    /// Stable openSenseMap box identifier.
    pub station_id: String,
    /// Title of the sensor the value was taken from (e.g. "Temperatur").
    pub sensor_title: String,
    /// Measured temperature in degrees Celsius.
    pub value: f64,
    /// When the measurement was taken.
    pub observed_at: Timestamp,
}

/// Classification band for an average temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempStatus {
    #[serde(rename = "Too Cold")]
    TooCold,
    Good,
    #[serde(rename = "Too Hot")]
    TooHot,
}

impl TempStatus {
    /// Human-readable label, also used in archive payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TooCold => "Too Cold",
            Self::Good => "Good",
            Self::TooHot => "Too Hot",
        }
    }
}

/// Where an aggregate was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Live,
}

/// The computed average with its classification. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Unweighted arithmetic mean of the accepted readings.
    pub average: f64,
    /// Classification band of `average`.
    pub status: TempStatus,
    /// Evaluation time the average was computed at.
    pub computed_at: Timestamp,
    /// Whether the value came from the cache or a live fetch.
    pub source: Source,
}

/// Outcome of one readiness probe. Computed fresh per call, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessVerdict {
    pub ready: bool,
    pub reason: String,
}

impl ReadinessVerdict {
    pub fn ready() -> Self {
        Self {
            ready: true,
            reason: "ok".to_string(),
        }
    }

    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self {
            ready: false,
            reason: reason.into(),
        }
    }
}
