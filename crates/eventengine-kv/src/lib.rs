//! # eventengine-kv
//!
//! Key-value implementations of
//! [`SessionStore`](eventengine_entity::SessionStore):
//!
//! - **memory**: process-local [`DashMap`](https://crates.io/crates/dashmap),
//!   for development and tests
//! - **redis**: JSON documents in Redis, one key per session plus a name index
//!
//! Each backend sits behind its own cargo feature.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis;

#[cfg(feature = "memory")]
pub use memory::MemorySessionStore;
#[cfg(feature = "redis-backend")]
pub use redis::{RedisClient, RedisSessionStore};
