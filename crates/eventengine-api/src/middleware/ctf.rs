//! Shared-secret gate for the CTF session route.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;

use eventengine_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Admits the request only if `Authorization` equals the configured CTF
/// secret verbatim. An unset secret admits nobody.
pub async fn require_ctf_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.as_bytes());

    if secret_matches(presented, &state.config.ctf.secret) {
        return Ok(next.run(request).await);
    }

    tracing::warn!(path = %request.uri().path(), "Rejected CTF request");
    Err(AppError::unauthorized("Invalid CTF authorization").into())
}

/// Constant-time comparison; an empty secret never matches.
fn secret_matches(presented: Option<&[u8]>, secret: &str) -> bool {
    match presented {
        Some(presented) if !secret.is_empty() => presented.ct_eq(secret.as_bytes()).into(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches(Some(b"letmein"), "letmein"));
        assert!(!secret_matches(Some(b"letmeout"), "letmein"));
        assert!(!secret_matches(Some(b"letmein2"), "letmein"));
        assert!(!secret_matches(Some(b"let"), "letmein"));
        assert!(!secret_matches(None, "letmein"));
    }

    #[test]
    fn test_empty_secret_admits_nobody() {
        assert!(!secret_matches(Some(b""), ""));
        assert!(!secret_matches(None, ""));
    }
}
