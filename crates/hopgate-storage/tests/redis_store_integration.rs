use std::time::Duration;

use hopgate_storage::{KvStore, RedisStore};
use hopgate_test_infra::redis::RedisServer;

/// Test fixture that manages a Redis container using test-infra.
struct Fixture {
    _redis: RedisServer,
    url: String,
}

impl Fixture {
    async fn start() -> Self {
        let redis = RedisServer::new().await.expect("start redis");
        let url = redis.url().await.expect("redis url");

        // Give the server a moment after the readiness line
        tokio::time::sleep(Duration::from_millis(500)).await;

        Self { _redis: redis, url }
    }
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let fixture = Fixture::start().await;
    let store = RedisStore::connect(&fixture.url).await.unwrap();

    assert!(store.get("abc123").await.unwrap().is_none());

    store
        .put("abc123", "aHR0cHM6Ly9leGFtcGxlLmNvbS9wYWdl".to_string())
        .await
        .unwrap();

    assert_eq!(
        store.get("abc123").await.unwrap().as_deref(),
        Some("aHR0cHM6Ly9leGFtcGxlLmNvbS9wYWdl")
    );
}

#[tokio::test]
async fn prefixed_store_isolates_keys() {
    let fixture = Fixture::start().await;
    let client = redis::Client::open(fixture.url.as_str()).unwrap();
    let conn = client.get_multiplexed_async_connection().await.unwrap();

    let links = RedisStore::with_prefix(conn.clone(), "links:");
    let logs = RedisStore::with_prefix(conn, "logs:");

    links.put("abc", "one".to_string()).await.unwrap();

    assert_eq!(links.get("abc").await.unwrap().as_deref(), Some("one"));
    assert!(logs.get("abc").await.unwrap().is_none());
}

#[tokio::test]
async fn connect_rejects_malformed_url() {
    let err = RedisStore::connect("not a redis url").await.unwrap_err();
    assert!(matches!(err, hopgate_storage::StorageError::Unavailable(_)));
}
