//! Key layout for the Redis session store.
//!
//! Every key starts with the configured prefix (default `eventengine:`).

/// Key holding the JSON document for one session.
pub fn session(prefix: &str, name: &str) -> String {
    format!("{prefix}session:{name}")
}

/// Set of every stored session name.
pub fn session_index(prefix: &str) -> String {
    format!("{prefix}sessions")
}
