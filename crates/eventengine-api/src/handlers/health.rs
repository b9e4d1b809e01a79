//! Health check handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use eventengine_entity::SessionStore;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /healthz/status
pub async fn status() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "success".to_string(),
        message: "ok".to_string(),
    })
}

/// GET /healthz/ready
///
/// 503 until the session store answers.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.session_service.store().health_check().await {
        Ok(true) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "success".to_string(),
                message: "store reachable".to_string(),
            }),
        ),
        Ok(false) => not_ready("store unhealthy".to_string()),
        Err(e) => not_ready(e.message),
    }
}

fn not_ready(message: String) -> (StatusCode, Json<HealthResponse>) {
    tracing::warn!(reason = %message, "Readiness check failed");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(HealthResponse {
            status: "error".to_string(),
            message,
        }),
    )
}
