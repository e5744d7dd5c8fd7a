//! REST API and SSE routes

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{Stream, StreamExt as FuturesStreamExt};
use serde::{Deserialize, Serialize};
use stintfuel_core::LapAdjust;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::CorsLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sources", get(list_sources))
        .route("/api/output", get(latest_output))
        .route("/api/output/stream", get(output_stream))
        .route("/api/target", post(set_target))
        .route("/api/target/lock", post(toggle_target_lock))
        .route("/api/target/adjust", post(adjust_target))
        .route("/api/reset", post(manual_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// === Source Endpoints ===

#[derive(Serialize)]
struct SourceInfo {
    name: String,
    detected: bool,
    active: bool,
}

async fn list_sources(State(state): State<AppState>) -> Json<Vec<SourceInfo>> {
    let sources = state.sources.read().await;
    let active_name = state.active_source.read().await;

    let info: Vec<SourceInfo> = sources
        .iter()
        .map(|source| SourceInfo {
            name: source.name().to_string(),
            detected: source.detect(),
            active: source.is_active()
                || active_name
                    .as_ref()
                    .map(|n| n == source.name())
                    .unwrap_or(false),
        })
        .collect();

    Json(info)
}

// === Output Endpoints ===

async fn latest_output(State(state): State<AppState>) -> impl IntoResponse {
    let latest = state.latest_output.read().await;
    match latest.clone() {
        Some(output) => Json(output).into_response(),
        None => (StatusCode::NOT_FOUND, "no engine output yet").into_response(),
    }
}

async fn output_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(output) => match serde_json::to_string(&output) {
                Ok(json) => Some(Ok(Event::default().data(json))),
                Err(e) => {
                    tracing::error!("Failed to serialize engine output: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Broadcast stream error: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// === Target Endpoints ===

#[derive(Deserialize)]
struct SetTargetRequest {
    /// Free-form numeric text, interpreted in the current display unit
    value: String,
}

#[derive(Serialize)]
struct TargetResponse {
    value: String,
    locked: bool,
}

async fn set_target(
    State(state): State<AppState>,
    Json(request): Json<SetTargetRequest>,
) -> Json<TargetResponse> {
    let mut engine = state.engine.write().await;
    engine.set_target_text(&request.value);
    Json(TargetResponse {
        value: engine.target_text().to_string(),
        locked: engine.is_target_locked(),
    })
}

#[derive(Serialize)]
struct LockResponse {
    locked: bool,
}

async fn toggle_target_lock(State(state): State<AppState>) -> Json<LockResponse> {
    let mut engine = state.engine.write().await;
    let locked = engine.toggle_target_lock();
    Json(LockResponse { locked })
}

#[derive(Deserialize)]
struct AdjustRequest {
    direction: LapAdjust,
}

async fn adjust_target(
    State(state): State<AppState>,
    Json(request): Json<AdjustRequest>,
) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    if engine.apply_lap_adjust(request.direction) {
        Json(TargetResponse {
            value: engine.target_text().to_string(),
            locked: engine.is_target_locked(),
        })
        .into_response()
    } else {
        (StatusCode::CONFLICT, "adjustment target not available").into_response()
    }
}

// === Reset Endpoint ===

async fn manual_reset(State(state): State<AppState>) -> StatusCode {
    let mut engine = state.engine.write().await;
    engine.manual_reset();
    StatusCode::NO_CONTENT
}
