//! HTTP surface tests for the tracking server
//!
//! Drives the Axum router directly with `tower::ServiceExt::oneshot`, one
//! temp data directory per test.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use formtrack::api::http::{create_router, AppState};
use formtrack::store::{EventLog, EventLogConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let log = EventLog::with_config(EventLogConfig::new(temp_dir.path()));
    let app = create_router(Arc::new(AppState::new(log)));
    (app, temp_dir)
}

async fn post_track(app: &Router, payload: &str) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/track")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_fresh_store_returns_zero_report() {
    let (app, _temp_dir) = test_app();

    let (status, body) = get_json(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allFormIds"], serde_json::json!([]));
    assert_eq!(body["kpis"]["totalUniqueUsers"], 0);
    assert_eq!(body["kpis"]["starts"], 0);
    assert_eq!(body["kpis"]["conversionRate"], 0.0);
    assert_eq!(body["charts"]["fieldInteractions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_track_then_report() {
    let (app, _temp_dir) = test_app();

    let status = post_track(
        &app,
        r#"{"event":"form_start","form_id":"signup","form_session_id":"s1","user_id":"u1","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let status = post_track(
        &app,
        r#"{"event":"form_submission","form_id":"signup","form_session_id":"s1","user_id":"u1","timestamp":"2024-01-01T00:00:10Z"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allFormIds"], serde_json::json!(["signup"]));
    assert_eq!(body["kpis"]["starts"], 1);
    assert_eq!(body["kpis"]["submissions"], 1);
    assert_eq!(body["kpis"]["conversionRate"], 100.0);
    assert_eq!(body["kpis"]["avgTimeToSubmit"], 10.0);
}

#[tokio::test]
async fn test_malformed_payload_rejected_and_not_appended() {
    let (app, temp_dir) = test_app();

    let status = post_track(&app, "this is { not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing may reach the log on a rejected request
    let events_path = temp_dir.path().join("form_events.jsonl");
    let line_count = std::fs::read_to_string(&events_path)
        .map(|content| content.lines().count())
        .unwrap_or(0);
    assert_eq!(line_count, 0);
}

#[tokio::test]
async fn test_appended_record_carries_server_timestamp() {
    let (app, temp_dir) = test_app();

    post_track(&app, r#"{"event":"form_start","form_id":"f"}"#).await;

    let content = std::fs::read_to_string(temp_dir.path().join("form_events.jsonl")).unwrap();
    let stored: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert!(stored["serverTimestamp"].is_string());
}

#[tokio::test]
async fn test_form_id_filter_applies() {
    let (app, _temp_dir) = test_app();

    post_track(
        &app,
        r#"{"event":"form_start","form_id":"signup","form_session_id":"s1","user_id":"u1","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .await;
    post_track(
        &app,
        r#"{"event":"form_start","form_id":"checkout","form_session_id":"s2","user_id":"u2","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .await;

    let (_, body) = get_json(&app, "/api/data?formId=signup").await;
    assert_eq!(body["kpis"]["starts"], 1);
    assert_eq!(
        body["allFormIds"],
        serde_json::json!(["signup", "checkout"])
    );

    // Unknown form: zero metrics, selector untouched
    let (_, body) = get_json(&app, "/api/data?formId=nope").await;
    assert_eq!(body["kpis"]["starts"], 0);
    assert_eq!(
        body["allFormIds"],
        serde_json::json!(["signup", "checkout"])
    );
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let (app, _temp_dir) = test_app();

    post_track(
        &app,
        r#"{"event":"form_start","form_id":"f","form_session_id":"s1","user_id":"u1","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .await;

    let (_, first) = get_json(&app, "/api/data").await;
    let (_, second) = get_json(&app, "/api/data").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_corrupt_log_line_degrades_gracefully() {
    let (app, temp_dir) = test_app();

    post_track(
        &app,
        r#"{"event":"form_start","form_id":"f","form_session_id":"s1","user_id":"u1","timestamp":"2024-01-01T00:00:00Z"}"#,
    )
    .await;

    // Corrupt the log in place; the report must still be served
    let events_path = temp_dir.path().join("form_events.jsonl");
    let mut content = std::fs::read_to_string(&events_path).unwrap();
    content.push_str("%%% torn line %%%\n");
    std::fs::write(&events_path, content).unwrap();

    let (status, body) = get_json(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpis"]["starts"], 1);
}
