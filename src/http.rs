//! HTTP transport — the chat endpoint and health probe.
//!
//! Owns the process-wide conversation history. The pipeline never writes
//! it: this layer appends under a single writer (the mutex guard) and hands
//! the pipeline a read-only snapshot of the prior messages.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::pipeline::{ConversationHistory, Pipeline};

/// Shared state behind the routes.
#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
    history: Arc<Mutex<ConversationHistory>>,
    started_at: DateTime<Utc>,
}

/// Build the chat router.
///
/// Call once and serve; all routes share one pipeline and one history.
pub fn chat_routes(pipeline: Arc<Pipeline>, history_cap: usize) -> Router {
    let state = AppState {
        pipeline,
        history: Arc::new(Mutex::new(ConversationHistory::new(history_cap))),
        started_at: Utc::now(),
    };

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorBody>)> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Chat request received");

    // Snapshot the prior messages, then record this one.
    let history = {
        let mut guard = state.history.lock().await;
        let snapshot = guard.snapshot();
        guard.push(request.message.clone());
        snapshot
    };

    match state.pipeline.submit(&request.message, &history).await {
        Ok(answer) => Ok(Json(ChatResponse { answer })),
        Err(e) => {
            // Hard failures surface as an error status, never as a generic
            // answer body.
            error!(%request_id, error = %e, "Pipeline pass failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    started_at: DateTime<Utc>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        started_at: state.started_at,
    })
}
