//! Pure domain logic for the average-temperature service.
//!
//! This crate contains no I/O: reading filtering, averaging, status
//! classification, and the readiness rule all operate on pre-loaded
//! data passed in by the caller. The I/O edges (station HTTP client,
//! Valkey cache, S3 archive) live in sibling crates and depend on the
//! types and traits defined here.

pub mod aggregate;
pub mod metric_names;
pub mod metrics;
pub mod readiness;
pub mod source;
pub mod types;

pub use metrics::{MetricsSink, NoopSink};
pub use source::TemperatureSource;
pub use types::{AggregateResult, ReadinessVerdict, Source, StationReading, TempStatus};
