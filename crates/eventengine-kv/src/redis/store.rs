//! Session store over Redis.
//!
//! Each session is a JSON document under `<prefix>session:<name>`; the
//! set `<prefix>sessions` indexes the names. Writes that touch both keys
//! run as Lua scripts so the document and the index never disagree.

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use tracing::warn;

use eventengine_core::error::{AppError, ErrorKind};
use eventengine_core::result::AppResult;
use eventengine_entity::{Session, SessionStore};

use super::client::RedisClient;
use crate::keys;

/// Create the document only if absent, then index it.
///
/// KEYS[1] = session document, KEYS[2] = name index
/// ARGV[1] = JSON document, ARGV[2] = session name
///
/// Returns 1 when inserted, 0 when the name was taken.
const INSERT_SCRIPT: &str = r#"
    if redis.call('SET', KEYS[1], ARGV[1], 'NX') then
        redis.call('SADD', KEYS[2], ARGV[2])
        return 1
    end
    return 0
"#;

/// Remove the document and its index entry.
///
/// KEYS[1] = session document, KEYS[2] = name index
/// ARGV[1] = session name
const DELETE_SCRIPT: &str = r#"
    local removed = redis.call('DEL', KEYS[1])
    redis.call('SREM', KEYS[2], ARGV[1])
    return removed
"#;

/// Bump `regCount` and stamp `updatedAt` inside the stored document.
///
/// KEYS[1] = session document
/// ARGV[1] = RFC 3339 timestamp
///
/// Returns the new count, or -1 when the document is missing.
const INCREMENT_SCRIPT: &str = r#"
    local raw = redis.call('GET', KEYS[1])
    if not raw then
        return -1
    end
    local doc = cjson.decode(raw)
    doc['regCount'] = (tonumber(doc['regCount']) or 0) + 1
    doc['updatedAt'] = ARGV[1]
    redis.call('SET', KEYS[1], cjson.encode(doc))
    return doc['regCount']
"#;

/// Overwrite a stored document, keeping its counter and creation fields.
///
/// KEYS[1] = session document
/// ARGV[1] = incoming JSON document
///
/// Returns the merged document, or nil when the document is missing.
const REPLACE_SCRIPT: &str = r#"
    local raw = redis.call('GET', KEYS[1])
    if not raw then
        return false
    end
    local stored = cjson.decode(raw)
    local doc = cjson.decode(ARGV[1])
    doc['regCount'] = stored['regCount']
    doc['createdAt'] = stored['createdAt']
    doc['createdBy'] = stored['createdBy']
    local encoded = cjson.encode(doc)
    redis.call('SET', KEYS[1], encoded)
    return encoded
"#;

/// Decode `MGET` results, skipping documents that are missing or unreadable.
fn decode_documents(names: &[String], docs: Vec<Option<String>>) -> Vec<Session> {
    let mut sessions = Vec::with_capacity(docs.len());
    for (name, doc) in names.iter().zip(docs) {
        match doc {
            Some(json) => match serde_json::from_str::<Session>(&json) {
                Ok(session) => sessions.push(session),
                Err(e) => warn!(session = %name, error = %e, "Skipping undecodable session document"),
            },
            None => warn!(session = %name, "Indexed session has no document"),
        }
    }
    sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
    sessions
}

/// Redis-backed session store.
#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    /// Create a store over an established client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn session_key(&self, name: &str) -> String {
        keys::session(self.client.prefix(), name)
    }

    fn index_key(&self) -> String {
        keys::session_index(self.client.prefix())
    }

    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(
            ErrorKind::BackendUnavailable,
            format!("Redis error: {e}"),
            e,
        )
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Session>> {
        let mut conn = self.client.conn_mut();
        let raw: Option<String> = conn
            .get(self.session_key(name))
            .await
            .map_err(Self::map_err)?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<Session>> {
        let mut conn = self.client.conn_mut();
        let names: Vec<String> = conn
            .smembers(self.index_key())
            .await
            .map_err(Self::map_err)?;

        if names.is_empty() {
            return Ok(Vec::new());
        }

        let doc_keys: Vec<String> = names.iter().map(|n| self.session_key(n)).collect();
        let docs: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&doc_keys)
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        Ok(decode_documents(&names, docs))
    }

    async fn insert(&self, session: &Session) -> AppResult<Session> {
        let json = serde_json::to_string(session)?;
        let mut conn = self.client.conn_mut();

        let inserted: i64 = redis::Script::new(INSERT_SCRIPT)
            .key(self.session_key(&session.name))
            .key(self.index_key())
            .arg(json)
            .arg(&session.name)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        if inserted == 1 {
            Ok(session.clone())
        } else {
            Err(AppError::already_exists(format!(
                "Session '{}' already exists",
                session.name
            )))
        }
    }

    async fn replace(&self, session: &Session) -> AppResult<Session> {
        let json = serde_json::to_string(session)?;
        let mut conn = self.client.conn_mut();

        let merged: Option<String> = redis::Script::new(REPLACE_SCRIPT)
            .key(self.session_key(&session.name))
            .arg(json)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        match merged {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(AppError::not_found(format!(
                "Session '{}' not found",
                session.name
            ))),
        }
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let removed: i64 = redis::Script::new(DELETE_SCRIPT)
            .key(self.session_key(name))
            .key(self.index_key())
            .arg(name)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(removed > 0)
    }

    async fn increment_reg_count(&self, name: &str) -> AppResult<i64> {
        let mut conn = self.client.conn_mut();
        let count: i64 = redis::Script::new(INCREMENT_SCRIPT)
            .key(self.session_key(name))
            .arg(Utc::now().to_rfc3339())
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        if count < 0 {
            return Err(AppError::not_found(format!("Session '{name}' not found")));
        }
        Ok(count)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
