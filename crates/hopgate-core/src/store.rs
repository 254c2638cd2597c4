use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A durable key-value store with get/put by opaque string keys.
///
/// Mapping entries and audit records both live behind this trait. Writes
/// are eventually visible to readers; implementations do no client-side
/// locking.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    /// Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        (**self).put(key, value).await
    }
}
