//! # eventengine-core
//!
//! Core crate for EventEngine. Contains the configuration schema, the
//! unified error system and the shared result alias.
//!
//! This crate has **no** internal dependencies on other EventEngine crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
