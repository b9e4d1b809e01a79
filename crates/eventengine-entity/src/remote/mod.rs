//! Records owned by the Lacework platform.

pub mod user;

pub use user::{RemoteUser, UserGroupRef};
