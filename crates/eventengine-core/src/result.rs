//! Convenience result type alias for EventEngine.

use crate::error::AppError;

/// A specialized `Result` type for EventEngine operations.
pub type AppResult<T> = Result<T, AppError>;
