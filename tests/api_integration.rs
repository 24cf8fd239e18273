//! Integration tests for the HTTP API
//!
//! Rounds created, stepped and recorded through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ringbite::core::create_router;
use ringbite::types::MouthConfig;
use serde_json::Value;
use tower::ServiceExt;

fn create_test_router() -> axum::Router {
    create_router(MouthConfig::default())
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["rounds_active"], 0);
}

#[tokio::test]
async fn test_create_round() {
    let app = create_test_router();
    let (status, json) = send(&app, "POST", "/round/new", Some(r#"{"frame_count": 8}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["round_id"].is_string());
    assert!(json["websocket_url"].as_str().unwrap().starts_with("/ws/"));
    assert_eq!(json["snapshot"]["mouth"]["frame_index"], 7);
    assert_eq!(json["snapshot"]["outcome"], "PLAYING");
}

#[tokio::test]
async fn test_zero_frames_rejected() {
    let app = create_test_router();
    let (status, _) = send(&app, "POST", "/round/new", Some(r#"{"frame_count": 0}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_round_not_found() {
    let app = create_test_router();
    let (status, _) = send(&app, "GET", "/round/nonexistent", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "POST", "/round/nonexistent/step", Some("{}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_round_flow() {
    // Router clones share state
    let app = create_test_router();

    let (_, json) = send(&app, "POST", "/round/new", Some("{}")).await;
    let id = json["round_id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &app,
        "POST",
        &format!("/round/{}/step", id),
        Some(r#"{"dt": 0.1, "finger": [1.0, 0.0], "zone": "entered"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mouth"]["phase"], "FINGER_INSIDE_COUNTING");

    let (_, json) = send(
        &app,
        "POST",
        &format!("/round/{}/step", id),
        Some(r#"{"dt": 0.1, "finger": [1.0, 0.0], "ring_touched": true}"#),
    )
    .await;
    assert_eq!(json["outcome"], "WON");
    assert_eq!(json["hand"], "with_ring");

    let (status, json) = send(&app, "GET", &format!("/round/{}/record", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "WON");
    assert_eq!(json["steps"], 2);
    assert_eq!(json["trace_fingerprint"].as_str().unwrap().len(), 64);

    let (_, json) = send(&app, "POST", &format!("/round/{}/restart", id), None).await;
    assert_eq!(json["outcome"], "PLAYING");
    assert_eq!(json["step"], 0);

    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["rounds_active"], 1);
}

#[tokio::test]
async fn test_oversized_round_rejected() {
    let app = create_test_router();
    let (status, _) = send(&app, "POST", "/round/new", Some(r#"{"frame_count": 1000000000000}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/round/new", Some(r#"{"config": {"chomp_count": 4294967295}}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/round/new", Some(r#"{"config": {"chomps_after_snap": 4294967295}}"#)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["rounds_active"], 0);
}

#[tokio::test]
async fn test_delete_round() {
    let app = create_test_router();
    let (_, json) = send(&app, "POST", "/round/new", Some("{}")).await;
    let id = json["round_id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/round/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/round/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/round/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["rounds_active"], 0);
}
