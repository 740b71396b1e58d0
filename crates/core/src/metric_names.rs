//! Canonical metric names exposed on `/metrics`.

/// Total `/temperature` requests served.
pub const TEMPERATURE_REQUESTS_TOTAL: &str = "temperature_requests_total";

/// Last computed or served average temperature in degrees Celsius.
pub const AVERAGE_TEMPERATURE: &str = "average_temperature";

/// Cache reads answered from the store.
pub const CACHE_HITS_TOTAL: &str = "cache_hits_total";

/// Cache reads that fell through to a live compute.
pub const CACHE_MISSES_TOTAL: &str = "cache_misses_total";

/// Cache operations that failed because the store was unreachable.
pub const CACHE_ERRORS_TOTAL: &str = "cache_errors_total";

/// Snapshots successfully written to blob storage.
pub const ARCHIVE_SNAPSHOTS_TOTAL: &str = "archive_snapshots_total";

/// Snapshot attempts that failed (storage unreachable, auth failure).
pub const ARCHIVE_FAILURES_TOTAL: &str = "archive_failures_total";
