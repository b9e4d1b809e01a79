//! # eventengine-api
//!
//! HTTP API layer for EventEngine built on Axum.
//!
//! Provides the session and registration endpoints, the liveness probe,
//! middleware (CORS, request logging, the CTF shared-secret gate),
//! extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
