use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HOST, LOCATION};
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hopgate_audit::codec::decode_record;
use hopgate_audit::{AuditRecorder, StoreSink};
use hopgate_gateway::app::HEALTH_PATH;
use hopgate_gateway::{App, AppState, SharedStore};
use hopgate_redirector::{Dispatcher, RedirectConfig, TokioSpawner, MISSING_FALLBACK_MESSAGE};
use hopgate_storage::{InMemoryStore, KvStore};
use tower::ServiceExt;

fn mappings() -> SharedStore {
    let store: InMemoryStore = [("abc123", STANDARD.encode("https://example.com/page"))]
        .into_iter()
        .collect();
    Arc::new(store)
}

fn router(fallback: Option<&str>, recorder: AuditRecorder) -> Router {
    let config = RedirectConfig {
        fallback_url: fallback.map(str::to_string),
    };
    let dispatcher = Dispatcher::new(mappings(), config, recorder, TokioSpawner::new()).unwrap();
    App::router(AppState::new(dispatcher))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(HOST, "go.example")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn redirects_known_slug() {
    let app = router(Some("https://home.example"), AuditRecorder::disabled());

    let response = app.oneshot(get("/abc123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "https://example.com/page");
}

#[tokio::test]
async fn unknown_slug_goes_to_fallback() {
    let app = router(Some("https://home.example"), AuditRecorder::disabled());

    let response = app.oneshot(get("/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "https://home.example");
}

#[tokio::test]
async fn root_path_goes_to_fallback() {
    let app = router(Some("https://home.example"), AuditRecorder::disabled());

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.headers()[LOCATION], "https://home.example");
}

#[tokio::test]
async fn any_method_is_dispatched() {
    let app = router(Some("https://home.example"), AuditRecorder::disabled());
    let request = Request::builder()
        .method("POST")
        .uri("/abc123")
        .body(Body::from("ignored"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[LOCATION], "https://example.com/page");
}

#[tokio::test]
async fn missing_fallback_is_reported_as_500() {
    let app = router(None, AuditRecorder::disabled());

    let response = app.oneshot(get("/unknown")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, MISSING_FALLBACK_MESSAGE.as_bytes());
}

#[tokio::test]
async fn health_route_is_not_a_slug() {
    let app = router(None, AuditRecorder::disabled());

    let response = app.oneshot(get(HEALTH_PATH)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn request_is_audited_in_the_background() {
    let audit_store = Arc::new(InMemoryStore::new());
    let recorder = AuditRecorder::builder()
        .sink(Arc::new(StoreSink::new(audit_store.clone())))
        .build();
    let app = router(Some("https://home.example"), recorder);

    let mut request = get("/abc123?src=mail");
    request
        .headers_mut()
        .insert(AUTHORIZATION, "Bearer s3cret".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    awaitility::at_most(Duration::from_secs(5))
        .poll_interval(Duration::from_millis(10))
        .until_async(|| async { !audit_store.keys_with_prefix("abc123:entries:").is_empty() })
        .await;

    let keys = audit_store.keys_with_prefix("abc123:entries:");
    let stored = audit_store.get(&keys[0]).await.unwrap().unwrap();
    let record = decode_record(&stored).unwrap();

    assert_eq!(record.request.url, "http://go.example/abc123?src=mail");
    assert_eq!(
        record.request.headers.get("Host").map(String::as_str),
        Some("go.example")
    );
    assert!(!record.request.headers.contains_key("Authorization"));
    assert_eq!(record.response.status, 302);
}
