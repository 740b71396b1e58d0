use thiserror::Error;

/// Failures of the underlying key-value store.
///
/// The gateway contains these at its boundary: a store failure
/// degrades the read path to a direct live compute and is surfaced
/// only through the metrics sink and logs.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("backend error: {0}")]
    Backend(String),
}
