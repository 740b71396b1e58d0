//! Injected metrics sink.
//!
//! The cache gateway and archiver report observability events through
//! this trait instead of touching process-global counters, so each
//! service instance owns its counters and tests can run without any
//! recorder wired up.

/// Observability side effects emitted by the core pipeline.
///
/// Implementations must be cheap and infallible; a metrics problem
/// must never affect the data path.
pub trait MetricsSink: Send + Sync {
    /// A cached average was served.
    fn cache_hit(&self) {}
    /// The cache was empty or expired and a live compute ran.
    fn cache_miss(&self) {}
    /// The cache store was unreachable.
    fn cache_error(&self) {}
    /// A snapshot was durably written.
    fn snapshot_written(&self) {}
    /// A snapshot attempt failed.
    fn snapshot_failed(&self) {}
    /// An average temperature was computed or served.
    fn observe_average(&self, _celsius: f64) {}
}

/// Sink that discards everything. Default for tests and tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl MetricsSink for NoopSink {}
