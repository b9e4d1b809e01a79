//! # eventengine-lacework
//!
//! Client for the subset of the Lacework API v2 that EventEngine drives:
//! access tokens, team users and user-group membership.
//!
//! [`LaceworkApi`] is the seam used by the service and worker crates;
//! [`LaceworkClient`] implements it over `reqwest`. Enable the `mock`
//! feature for an in-memory implementation usable in tests.

pub mod api;
pub mod client;
pub mod error;
pub mod wire;

#[cfg(feature = "mock")]
pub mod mock;

pub use api::LaceworkApi;
pub use client::LaceworkClient;
pub use error::{LaceworkError, Operation};

#[cfg(feature = "mock")]
pub use mock::MockLaceworkApi;
