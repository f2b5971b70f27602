//! HTTP control surface for the gathering scheduler
//!
//! | Method | Path                      | Effect                               |
//! |--------|---------------------------|--------------------------------------|
//! | POST   | `/api/gathering/start`    | start the worker (`mode`, `batchSize`) |
//! | POST   | `/api/gathering/stop`     | request a cooperative stop           |
//! | GET    | `/api/gathering/status`   | [`GatheringStatus`] snapshot         |
//! | GET    | `/api/gathering/count`    | profiles gathered since last start   |

use crate::crawler::GatheringScheduler;
use crate::state::{GatheringMode, GatheringStatus};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<GatheringScheduler>,
}

impl AppState {
    pub fn new(scheduler: Arc<GatheringScheduler>) -> Self {
        Self { scheduler }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartQuery {
    mode: Option<String>,
    batch_size: Option<u32>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/gathering/start", post(start_handler))
        .route("/api/gathering/stop", post(stop_handler))
        .route("/api/gathering/status", get(status_handler))
        .route("/api/gathering/count", get(count_handler))
        .with_state(Arc::new(state))
}

/// Serves the control surface until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Control surface listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn start_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StartQuery>,
) -> Response {
    let mode_param = query.mode.unwrap_or_else(|| GatheringMode::Random.to_string());
    let batch_size = query.batch_size.unwrap_or(50);
    tracing::info!(
        "POST /api/gathering/start - mode: {}, batch size: {}",
        mode_param,
        batch_size
    );

    let mode = match mode_param.parse::<GatheringMode>() {
        Ok(mode) => mode,
        Err(message) => return rejected(message),
    };

    match state.scheduler.start(mode, batch_size) {
        Ok(()) => Json(json!({
            "success": true,
            "message": "Data gathering started successfully",
            "mode": mode,
            "batchSize": batch_size,
        }))
        .into_response(),
        Err(e) => rejected(e.to_string()),
    }
}

async fn stop_handler(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("POST /api/gathering/stop");

    match state.scheduler.stop() {
        Ok(()) => Json(json!({
            "success": true,
            "message": "Data gathering stop signal sent",
        }))
        .into_response(),
        Err(e) => rejected(e.to_string()),
    }
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<GatheringStatus> {
    tracing::debug!("GET /api/gathering/status");
    Json(state.scheduler.status())
}

async fn count_handler(State(state): State<Arc<AppState>>) -> Json<u64> {
    tracing::debug!("GET /api/gathering/count");
    Json(state.scheduler.total_gathered())
}

fn rejected(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "message": message.into() })),
    )
        .into_response()
}
