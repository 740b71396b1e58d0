//! Instance-scoped service metrics and their Prometheus rendering.
//!
//! Counters are plain atomics owned by the service instance (no
//! global registry), updated through the [`MetricsSink`] trait by the
//! cache gateway and archiver, and rendered as text exposition format
//! by the `/metrics` route.

use std::sync::atomic::{AtomicU64, Ordering};

use meantemp_core::metric_names as names;
use meantemp_core::MetricsSink;

/// All counters and gauges exposed on `/metrics`.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    temperature_requests: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_errors: AtomicU64,
    archive_snapshots: AtomicU64,
    archive_failures: AtomicU64,
    /// f64 bit pattern of the last observed average.
    average_temperature: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one `/temperature` request.
    pub fn record_request(&self) {
        self.temperature_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Render the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        counter(
            &mut out,
            names::TEMPERATURE_REQUESTS_TOTAL,
            "Total number of temperature requests",
            self.temperature_requests.load(Ordering::Relaxed),
        );
        counter(
            &mut out,
            names::CACHE_HITS_TOTAL,
            "Cache reads answered from the store",
            self.cache_hits.load(Ordering::Relaxed),
        );
        counter(
            &mut out,
            names::CACHE_MISSES_TOTAL,
            "Cache reads that fell through to a live compute",
            self.cache_misses.load(Ordering::Relaxed),
        );
        counter(
            &mut out,
            names::CACHE_ERRORS_TOTAL,
            "Cache operations that failed because the store was unreachable",
            self.cache_errors.load(Ordering::Relaxed),
        );
        counter(
            &mut out,
            names::ARCHIVE_SNAPSHOTS_TOTAL,
            "Snapshots successfully written to blob storage",
            self.archive_snapshots.load(Ordering::Relaxed),
        );
        counter(
            &mut out,
            names::ARCHIVE_FAILURES_TOTAL,
            "Snapshot attempts that failed",
            self.archive_failures.load(Ordering::Relaxed),
        );

        let average = f64::from_bits(self.average_temperature.load(Ordering::Relaxed));
        out.push_str(&format!(
            "# HELP {} Average temperature over the last hour\n",
            names::AVERAGE_TEMPERATURE
        ));
        out.push_str(&format!("# TYPE {} gauge\n", names::AVERAGE_TEMPERATURE));
        out.push_str(&format!("{} {}\n", names::AVERAGE_TEMPERATURE, average));

        out
    }
}

fn counter(out: &mut String, name: &str, help: &str, value: u64) {
    out.push_str(&format!("# HELP {name} {help}\n"));
    out.push_str(&format!("# TYPE {name} counter\n"));
    out.push_str(&format!("{name} {value}\n"));
}

impl MetricsSink for ServiceMetrics {
    fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    fn cache_error(&self) {
        self.cache_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot_written(&self) {
        self.archive_snapshots.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot_failed(&self) {
        self.archive_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn observe_average(&self, celsius: f64) {
        self.average_temperature
            .store(celsius.to_bits(), Ordering::Relaxed);
    }
}
