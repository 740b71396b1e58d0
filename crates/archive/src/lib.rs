//! Periodic archival of the computed aggregate to blob storage.
//!
//! The archiver reuses the cache gateway's read path (triggering a
//! live compute on a cold cache) and writes one timestamped JSON
//! object per snapshot. Storage is behind the [`BlobStore`] trait
//! with an S3-compatible adapter for production (MinIO included) and
//! an in-memory adapter for tests.

pub mod archiver;
pub mod error;
pub mod memory;
pub mod s3;
pub mod store;

pub use archiver::{ArchiveReceipt, Archiver, SNAPSHOT_INTERVAL};
pub use error::ArchiveError;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;
pub use store::BlobStore;
