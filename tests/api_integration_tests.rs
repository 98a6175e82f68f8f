//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint, with the
//! in-memory fake standing in for the durable backing store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cachefront::backing::{BackingStore, MemoryStore};
use cachefront::cache::CacheStore;
use cachefront::{AppState, CacheCoordinator};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let coordinator = CacheCoordinator::new(CacheStore::new(100), store.clone());
    (cachefront::api::create_router(AppState::new(coordinator)), store)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_request(key: &str, value: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(format!("/kv/{}", key))
        .body(Body::from(value.to_string()))
        .unwrap()
}

fn get_request(key: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/kv/{}", key))
        .body(Body::empty())
        .unwrap()
}

fn delete_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/kv/{}", key))
        .body(Body::empty())
        .unwrap()
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let (app, _store) = create_test_app();

    let response = app.oneshot(put_request("test_key", "test_value")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("message").is_some());
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_put_endpoint_persists_to_backing_store() {
    let (app, store) = create_test_app();

    let response = app.oneshot(put_request("durable_key", "durable_value")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The write went through to the durable store, not just the cache
    assert_eq!(
        store.get("durable_key").await.unwrap(),
        Some("durable_value".to_string())
    );
}

#[tokio::test]
async fn test_put_endpoint_store_failure_returns_503() {
    let (app, store) = create_test_app();

    store.set_available(false);
    let response = app
        .clone()
        .oneshot(put_request("key", "value"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // The failed write must not leave a cached value behind
    store.set_available(true);
    let response = app.oneshot(get_request("key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_roundtrip() {
    let (app, _store) = create_test_app();

    let response = app.clone().oneshot(put_request("get_key", "get_value")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("get_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let (app, _store) = create_test_app();

    let response = app.oneshot(get_request("nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_endpoint_reads_through_to_backing_store() {
    let (app, store) = create_test_app();

    // Value exists only in the durable store; the cache is cold
    store.put("warm_me", "from_db").await.unwrap();

    let response = app.clone().oneshot(get_request("warm_me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "from_db");

    // The first read was a miss, the second is served from the cache
    let response = app.clone().oneshot(get_request("warm_me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hits"], 1);
}

#[tokio::test]
async fn test_get_endpoint_store_failure_returns_503() {
    let (app, store) = create_test_app();

    store.set_available(false);
    let response = app.oneshot(get_request("any_key")).await.unwrap();

    // A down store is not the same as a missing key
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_removes_key() {
    let (app, _store) = create_test_app();

    app.clone().oneshot(put_request("doomed", "value")).await.unwrap();

    let response = app.clone().oneshot(delete_request("doomed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("doomed")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_is_idempotent() {
    let (app, _store) = create_test_app();

    // Deleting a key that never existed still succeeds
    let response = app.oneshot(delete_request("never_written")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_starts_at_zero() {
    let (app, _store) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 0);
    assert_eq!(json["misses"], 0);
    assert_eq!(json["hit_rate"], 0.0);
}

#[tokio::test]
async fn test_stats_endpoint_reports_percentage() {
    let (app, _store) = create_test_app();

    // One miss (absent key), then one hit after a write
    app.clone().oneshot(get_request("absent")).await.unwrap();
    app.clone().oneshot(put_request("present", "v")).await.unwrap();
    app.clone().oneshot(get_request("present")).await.unwrap();

    let response = app
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 50.0);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _store) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
