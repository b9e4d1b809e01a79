//! Route handlers organized by domain.

pub mod health;
pub mod register;
pub mod session;
