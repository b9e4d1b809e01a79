//! Route definitions for the EventEngine HTTP API.
//!
//! Session and registration routes are mounted under `/api`; probes live
//! under `/healthz`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and state attached.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes(state.clone()))
        .merge(register_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes())
        .with_state(state)
}

/// Session CRUD, bulk delete, CTF create and default-instance lookup.
///
/// Collection routes answer with and without the trailing slash.
fn session_routes(state: AppState) -> Router<AppState> {
    let collection = get(handlers::session::list_sessions)
        .post(handlers::session::create_session)
        .delete(handlers::session::delete_sessions);

    Router::new()
        .route("/sessions", collection.clone())
        .route("/sessions/", collection)
        .route(
            "/sessions/defaultinstance",
            get(handlers::session::default_instance),
        )
        .route(
            "/sessions/ctfaddsession",
            post(handlers::session::create_session).route_layer(
                axum_middleware::from_fn_with_state(state, middleware::ctf::require_ctf_secret),
            ),
        )
        .route(
            "/sessions/{name}",
            get(handlers::session::get_session)
                .put(handlers::session::update_session)
                .delete(handlers::session::delete_session),
        )
}

/// Registrant sign-up.
fn register_routes() -> Router<AppState> {
    Router::new().route("/register/{name}", post(handlers::register::register))
}

/// Liveness and readiness probes.
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz/status", get(handlers::health::status))
        .route("/healthz/ready", get(handlers::health::ready))
}
