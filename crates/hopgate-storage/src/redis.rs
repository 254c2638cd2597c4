use ::redis::AsyncCommands;
use async_trait::async_trait;
use hopgate_core::error::Result;
use hopgate_core::{KvStore, StorageError};
use tracing::{debug, trace, warn};

/// A Redis-backed implementation of [`KvStore`].
///
/// Values are stored as plain Redis strings under an optional key prefix,
/// so mapping entries written by an external process are read unchanged.
#[derive(Debug, Clone)]
pub struct RedisStore {
    conn: ::redis::aio::MultiplexedConnection,
    key_prefix: String,
}

fn map_redis_error(operation: &str, err: ::redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("timed out") {
        StorageError::Timeout(message)
    } else if lowered.contains("connection refused") || lowered.contains("broken pipe") {
        StorageError::Unavailable(message)
    } else {
        StorageError::Operation(message)
    }
}

impl RedisStore {
    /// Creates a new Redis store without a key prefix.
    pub fn new(conn: ::redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, "")
    }

    /// Creates a new Redis store with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    /// * `key_prefix` - Prefix prepended to every key (e.g., "links:")
    pub fn with_prefix(
        conn: ::redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a multiplexed connection to the Redis server at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = ::redis::Client::open(url)
            .map_err(|e| StorageError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let full_key = self.full_key(key);
        trace!(key = %full_key, "reading value from Redis");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(value) => {
                debug!(key = %full_key, found = value.is_some(), "read value from Redis");
                Ok(value)
            }
            Err(e) => {
                warn!(key = %full_key, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        let full_key = self.full_key(key);
        trace!(key = %full_key, "writing value to Redis");

        let mut conn = self.conn.clone();
        match conn.set::<_, _, ()>(&full_key, value).await {
            Ok(()) => {
                debug!(key = %full_key, "wrote value to Redis");
                Ok(())
            }
            Err(e) => {
                warn!(key = %full_key, error = %e, "Redis error on set");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }
}
