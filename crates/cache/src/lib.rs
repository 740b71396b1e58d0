//! Cache-aside layer over a TTL-capable key-value store.
//!
//! A single key holds the last computed average and a second key holds
//! the last-refresh timestamp. The store contract is the [`KvStore`]
//! trait with a Valkey/Redis adapter for production and an in-memory
//! adapter for tests. There is deliberately no eviction logic beyond
//! store-native TTL expiry: the workload is one aggregate key, not a
//! keyspace.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod store;
pub mod valkey;

pub use error::CacheError;
pub use gateway::CacheGateway;
pub use memory::MemoryStore;
pub use store::KvStore;
pub use valkey::ValkeyStore;
