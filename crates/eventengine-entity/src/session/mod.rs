//! Session domain entities.

pub mod instance;
pub mod model;
pub mod store;

pub use instance::InstanceType;
pub use model::Session;
pub use store::SessionStore;
