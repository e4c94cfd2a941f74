//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dialog turns
        .route("/api/chat", post(chat))
        // Liveness plus a storage probe
        .route("/health", get(health))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

/// Handle one dialog turn
async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let output = state
        .engine
        .handle_turn(req.session_id, req.message)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(Json(ChatResponse {
        response: output.reply,
        session_id: output.session_id,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

// ============================================================
// Health
// ============================================================

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.db.count_active_sessions(Utc::now()) {
        Ok(active) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                active_sessions: Some(active),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                active_sessions: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("teller ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
