use async_trait::async_trait;
use dashmap::DashMap;
use hopgate_core::error::Result;
use hopgate_core::KvStore;

/// In-memory implementation of [`KvStore`] using DashMap.
///
/// DashMap shards its locks, so concurrent reads and writes to different
/// keys do not block each other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    storage: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Returns the stored keys that start with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .storage
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InMemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let storage = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { storage }
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.storage.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemoryStore::new();

        store
            .put("abc123", "aHR0cHM6Ly9leGFtcGxlLmNvbQ==".to_string())
            .await
            .unwrap();

        let value = store.get("abc123").await.unwrap();
        assert_eq!(value.as_deref(), Some("aHR0cHM6Ly9leGFtcGxlLmNvbQ=="));
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = InMemoryStore::new();

        store.put("k", "one".to_string()).await.unwrap();
        store.put("k", "two".to_string()).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn collects_from_pairs() {
        let store: InMemoryStore = [("a", "1"), ("b", "2")].into_iter().collect();

        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn keys_with_prefix_are_sorted() {
        let store: InMemoryStore = [
            ("abc:entries:2", ""),
            ("abc:entries:1", ""),
            ("abd:entries:0", ""),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            store.keys_with_prefix("abc:entries:"),
            vec!["abc:entries:1".to_string(), "abc:entries:2".to_string()]
        );
    }

    #[tokio::test]
    async fn concurrent_access() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .put(&format!("key-{i:03}"), format!("value-{i}"))
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let _ = store.get(&format!("key-{i:03}")).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let value = store.get(&format!("key-{i:03}")).await.unwrap();
            assert_eq!(value, Some(format!("value-{i}")));
        }
    }
}
