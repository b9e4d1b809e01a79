//! # eventengine-entity
//!
//! Domain entity models for EventEngine. [`session::Session`] is the only
//! persisted entity; remote users and access tokens are ephemeral values
//! exchanged with the Lacework platform. The [`session::SessionStore`]
//! contract lives next to the model it persists.

pub mod registration;
pub mod remote;
pub mod session;
pub mod tenant;
pub mod token;

pub use registration::Registrant;
pub use remote::RemoteUser;
pub use session::{InstanceType, Session, SessionStore};
pub use tenant::TenantCredentials;
pub use token::AccessToken;
