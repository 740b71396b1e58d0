use thiserror::Error;

/// Failures of the snapshot operation.
///
/// Timer-driven snapshots log these and retry on the next natural
/// tick; there is no backlog of missed snapshots.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// No cached or live aggregate existed at snapshot time. Absence
    /// is not a storage failure and is reported separately.
    #[error("no temperature data available to archive")]
    NoData,

    #[error("blob storage error: {0}")]
    Storage(String),

    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
