//! Router tests for the gathering control surface

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use http_body_util::BodyExt;
use serde_json::Value;
use squad_scout::config::GatheringConfig;
use squad_scout::crawler::GatheringScheduler;
use squad_scout::server::{app, AppState};
use squad_scout::storage::ProfileStore;
use std::sync::Arc;
use tower::ServiceExt;

fn build_scheduler() -> Arc<GatheringScheduler> {
    let store: Arc<dyn ProfileStore> = memory_store();
    let profiles = Arc::new(FakeProfileApi::new());
    let crawler = crawler(store.clone(), profiles.clone(), Arc::new(FakeMatchApi::new()));
    let pager = pager(
        store.clone(),
        profiles,
        Arc::new(FakeBannedListApi::new()),
        &banned_config(100, 100),
    );

    Arc::new(GatheringScheduler::new(
        Arc::new(crawler),
        Arc::new(pager),
        store,
        &GatheringConfig {
            delay_between_batches: 60_000,
            error_retry_delay: 60_000,
        },
    ))
}

async fn send(router: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let resp = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_status_when_idle() {
    let router = app(AppState::new(build_scheduler()));

    let (status, body) = send(&router, "GET", "/api/gathering/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRunning"], false);
    assert_eq!(body["state"], "IDLE");
    assert_eq!(body["totalProfilesGathered"], 0);
    assert_eq!(body["uptime"], 0);
}

#[tokio::test]
async fn test_stop_when_idle_is_bad_request() {
    let router = app(AppState::new(build_scheduler()));

    let (status, body) = send(&router, "POST", "/api/gathering/stop").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Data gathering is not running");
}

#[tokio::test]
async fn test_start_then_reject_second_start() {
    let scheduler = build_scheduler();
    let router = app(AppState::new(scheduler.clone()));

    let (status, body) = send(&router, "POST", "/api/gathering/start?mode=BANNED&batchSize=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["mode"], "BANNED");
    assert_eq!(body["batchSize"], 5);

    let (status, body) = send(&router, "POST", "/api/gathering/start?mode=RANDOM").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Data gathering is already running");

    let (status, body) = send(&router, "GET", "/api/gathering/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isRunning"], true);
    assert_eq!(body["mode"], "BANNED");

    let (status, body) = send(&router, "GET", "/api/gathering/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, 0);

    let (status, body) = send(&router, "POST", "/api/gathering/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_start_uses_defaults() {
    let scheduler = build_scheduler();
    let router = app(AppState::new(scheduler.clone()));

    let (status, body) = send(&router, "POST", "/api/gathering/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "RANDOM");
    assert_eq!(body["batchSize"], 50);
    scheduler.shutdown().await;
}

#[tokio::test]
async fn test_start_rejects_bad_parameters() {
    let scheduler = build_scheduler();
    let router = app(AppState::new(scheduler.clone()));

    let (status, body) = send(&router, "POST", "/api/gathering/start?mode=EVERYONE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid gathering mode 'EVERYONE'. Use BANNED or RANDOM");

    let (status, body) = send(&router, "POST", "/api/gathering/start?batchSize=51").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    assert!(!scheduler.status().is_running);
}
