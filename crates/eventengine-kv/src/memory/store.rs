//! Session store over a concurrent map.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use eventengine_core::error::AppError;
use eventengine_core::result::AppResult;
use eventengine_entity::{Session, SessionStore};

/// Process-local session store. Contents are lost on restart.
///
/// Shard-level locking in `DashMap` makes insert and increment atomic per
/// name without a global lock.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.get(name).map(|entry| entry.value().clone()))
    }

    async fn get_all(&self) -> AppResult<Vec<Session>> {
        let mut all: Vec<Session> = self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(all)
    }

    async fn insert(&self, session: &Session) -> AppResult<Session> {
        match self.sessions.entry(session.name.clone()) {
            Entry::Occupied(_) => Err(AppError::already_exists(format!(
                "Session '{}' already exists",
                session.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(session.clone())
            }
        }
    }

    async fn replace(&self, session: &Session) -> AppResult<Session> {
        match self.sessions.get_mut(&session.name) {
            Some(mut stored) => {
                let merged = Session {
                    created_at: stored.created_at,
                    created_by: stored.created_by.clone(),
                    reg_count: stored.reg_count,
                    ..session.clone()
                };
                *stored = merged.clone();
                Ok(merged)
            }
            None => Err(AppError::not_found(format!(
                "Session '{}' not found",
                session.name
            ))),
        }
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        Ok(self.sessions.remove(name).is_some())
    }

    async fn increment_reg_count(&self, name: &str) -> AppResult<i64> {
        let mut stored = self
            .sessions
            .get_mut(name)
            .ok_or_else(|| AppError::not_found(format!("Session '{name}' not found")))?;
        stored.reg_count += 1;
        stored.updated_at = Utc::now();
        Ok(stored.reg_count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
