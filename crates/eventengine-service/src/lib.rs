//! # eventengine-service
//!
//! Session lifecycle use cases. [`SessionService`] enforces the existence
//! rules around the store, runs the registration flow against Lacework and
//! performs cascade deletes. [`UserCascade`] is the remote-user cleanup
//! shared with the expiry reconciler.
//!
//! Dependencies are injected at construction time as `Arc<dyn ...>`.

pub mod session;

pub use session::{CascadeReport, SessionService, UserCascade};

#[cfg(test)]
pub(crate) mod test_support;
