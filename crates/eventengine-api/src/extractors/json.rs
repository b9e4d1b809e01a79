//! JSON body extractors that reject with the API error body.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use eventengine_core::error::AppError;

use crate::error::ApiError;

/// `Json<T>` whose rejection is a `VALIDATION` error instead of axum's
/// plain-text 4xx.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Invalid request body: {}", e.body_text())))?;
        Ok(Self(value))
    }
}

/// Deserializes JSON and runs `validator::Validate` on it.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;
        validate(&value)?;
        Ok(Self(value))
    }
}

/// Run validation, mapping failures to a `VALIDATION` error.
pub fn validate<T: Validate>(value: &T) -> Result<(), ApiError> {
    value
        .validate()
        .map_err(|e| ApiError::from(AppError::validation(format!("Invalid request: {e}"))))
}
