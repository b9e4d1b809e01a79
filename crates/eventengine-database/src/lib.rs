//! # eventengine-database
//!
//! PostgreSQL connection management and the sqlx-backed
//! [`SessionStore`](eventengine_entity::SessionStore) implementation.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::SessionRepository;
