//! Repository implementations.

pub mod session;

pub use session::SessionRepository;
