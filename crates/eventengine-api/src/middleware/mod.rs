//! Axum middleware stack.

pub mod cors;
pub mod ctf;
pub mod logging;
