//! openSenseMap station client and the temperature aggregator.
//!
//! The client is a stateless I/O boundary: one bounded HTTP request
//! per station, any failure mapped to absence. The aggregator fans
//! out over the configured station list and delegates filtering,
//! averaging, and classification to `meantemp-core`.

pub mod aggregator;
pub mod client;

pub use aggregator::Aggregator;
pub use client::StationClient;
