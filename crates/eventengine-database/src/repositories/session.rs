//! Session repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use eventengine_core::error::{AppError, ErrorKind};
use eventengine_core::result::AppResult;
use eventengine_entity::{Session, SessionStore};

/// PostgreSQL-backed session store.
///
/// Each call checks a connection out of the pool for the duration of one
/// statement; sqlx returns it on every path.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::BackendUnavailable, message, e)
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_error("Failed to find session"))
    }

    async fn get_all(&self) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(backend_error("Failed to list sessions"))
    }

    async fn insert(&self, session: &Session) -> AppResult<Session> {
        let inserted = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (name, instance_type, lw_url, lw_sub_account, lw_access_key_id, \
             lw_secret_key, lw_user_group, created_by, updated_by, created_at, updated_at, \
             expires_at, reg_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (name) DO NOTHING RETURNING *",
        )
        .bind(&session.name)
        .bind(session.instance_type)
        .bind(&session.lw_url)
        .bind(&session.lw_sub_account)
        .bind(&session.lw_access_key_id)
        .bind(&session.lw_secret_key)
        .bind(&session.lw_user_group)
        .bind(&session.created_by)
        .bind(&session.updated_by)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(session.expires_at)
        .bind(session.reg_count)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error("Failed to create session"))?;

        inserted.ok_or_else(|| {
            AppError::already_exists(format!("Session '{}' already exists", session.name))
        })
    }

    async fn replace(&self, session: &Session) -> AppResult<Session> {
        let updated = sqlx::query_as::<_, Session>(
            "UPDATE sessions SET instance_type = $2, lw_url = $3, lw_sub_account = $4, \
             lw_access_key_id = $5, lw_secret_key = $6, lw_user_group = $7, updated_by = $8, \
             updated_at = $9, expires_at = $10 \
             WHERE name = $1 RETURNING *",
        )
        .bind(&session.name)
        .bind(session.instance_type)
        .bind(&session.lw_url)
        .bind(&session.lw_sub_account)
        .bind(&session.lw_access_key_id)
        .bind(&session.lw_secret_key)
        .bind(&session.lw_user_group)
        .bind(&session.updated_by)
        .bind(session.updated_at)
        .bind(session.expires_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error("Failed to update session"))?;

        updated.ok_or_else(|| AppError::not_found(format!("Session '{}' not found", session.name)))
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(backend_error("Failed to delete session"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_reg_count(&self, name: &str) -> AppResult<i64> {
        let count: Option<i64> = sqlx::query_scalar(
            "UPDATE sessions SET reg_count = reg_count + 1, updated_at = NOW() \
             WHERE name = $1 RETURNING reg_count",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_error("Failed to increment registration count"))?;

        count.ok_or_else(|| AppError::not_found(format!("Session '{name}' not found")))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(backend_error("Health check failed"))
    }
}
