//! Session store contract.

use async_trait::async_trait;

use eventengine_core::result::AppResult;

use super::model::Session;

/// Persistence for [`Session`] records, keyed by name.
///
/// Implementations acquire a backend connection per call and must release
/// it on every path. A missing record is `Ok(None)` / `Ok(false)`, never an
/// error; backend failures surface as `BackendUnavailable`.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a session by name.
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Session>>;

    /// Fetch every stored session.
    async fn get_all(&self) -> AppResult<Vec<Session>>;

    /// Insert a new session.
    ///
    /// The write is conditional on the name being free; a collision fails
    /// with `AlreadyExists` and leaves the stored record untouched.
    async fn insert(&self, session: &Session) -> AppResult<Session>;

    /// Overwrite the mutable fields of the record named `session.name`
    /// and return the stored result.
    ///
    /// `createdAt`, `createdBy` and `regCount` always keep their stored
    /// values, so a concurrent `increment_reg_count` is never lost. Fails
    /// with `NotFound` if no such record exists.
    async fn replace(&self, session: &Session) -> AppResult<Session>;

    /// Delete a session. Returns `true` if a record was removed.
    async fn delete_by_name(&self, name: &str) -> AppResult<bool>;

    /// Atomically add one to `regCount` and refresh `updatedAt`.
    ///
    /// Returns the new count. Fails with `NotFound` if the session is gone.
    async fn increment_reg_count(&self, name: &str) -> AppResult<i64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
