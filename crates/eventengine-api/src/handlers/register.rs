//! Registration handler.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::RegisterUserRequest;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/register/{name}
///
/// Creates the remote user and echoes the request on success.
pub async fn register(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(req): ValidatedJson<RegisterUserRequest>,
) -> Result<Json<RegisterUserRequest>, ApiError> {
    state
        .session_service
        .register_user(&name, &req.to_registrant())
        .await?;
    Ok(Json(req))
}
