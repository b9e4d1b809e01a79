//! Session management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use eventengine_entity::Session;

use crate::dto::request::{BulkDeleteRequest, DeleteSessionQuery, SessionRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::json::validate;
use crate::extractors::{ApiJson, ValidatedJson};
use crate::state::AppState;

/// GET /api/sessions/
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<Session>>, ApiError> {
    let sessions = state.session_service.list_sessions().await?;
    Ok(Json(sessions))
}

/// GET /api/sessions/{name}
pub async fn get_session(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Session>, ApiError> {
    let session = state.session_service.get_session(&name).await?;
    Ok(Json(session))
}

/// POST /api/sessions/ and POST /api/sessions/ctfaddsession
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let created = state.session_service.add_session(req.into_session()).await?;
    Ok(Json(created))
}

/// PUT /api/sessions/{name}
///
/// The path names the record; a `name` in the body is ignored.
pub async fn update_session(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(mut req): ApiJson<SessionRequest>,
) -> Result<Json<Session>, ApiError> {
    req.name = name.clone();
    validate(&req)?;
    let updated = state
        .session_service
        .update_session(&name, req.into_session())
        .await?;
    Ok(Json(updated))
}

/// DELETE /api/sessions/{name}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<DeleteSessionQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .session_service
        .delete_session(&name, query.force)
        .await?;
    Ok(Json(MessageResponse::new("Session deleted.")))
}

/// DELETE /api/sessions/
pub async fn delete_sessions(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BulkDeleteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_service.delete_sessions(&req.sessions).await?;
    Ok(Json(MessageResponse::new("Sessions deleted.")))
}

/// GET /api/sessions/defaultinstance
pub async fn default_instance(State(state): State<AppState>) -> String {
    state.session_service.default_instance_url().to_owned()
}
