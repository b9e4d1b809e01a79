//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use eventengine_core::config::AppConfig;
use eventengine_service::SessionService;

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session lifecycle and registration.
    pub session_service: Arc<SessionService>,
}

impl AppState {
    /// Bundle the shared dependencies.
    pub fn new(config: Arc<AppConfig>, session_service: Arc<SessionService>) -> Self {
        Self {
            config,
            session_service,
        }
    }
}
