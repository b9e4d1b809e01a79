//! Session services.

pub mod cascade;
pub mod registration;
pub mod service;

pub use cascade::{CascadeReport, UserCascade};
pub use service::SessionService;
