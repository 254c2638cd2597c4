//! Key-value store adapters for hopgate.
//!
//! [`InMemoryStore`] backs tests and single-node runs; [`RedisStore`] is the
//! durable store for mapping entries and audit records.

pub mod memory;
pub mod redis;

pub use self::memory::InMemoryStore;
pub use self::redis::RedisStore;
pub use hopgate_core::{KvStore, StorageError};
