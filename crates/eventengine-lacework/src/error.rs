//! Client-level errors and their mapping into [`AppError`].

use std::fmt;

use eventengine_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// The API call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateToken,
    CreateUser,
    AssignGroup,
    ListUsers,
    DeleteUser,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateToken => write!(f, "create access token"),
            Self::CreateUser => write!(f, "create team user"),
            Self::AssignGroup => write!(f, "add user to group"),
            Self::ListUsers => write!(f, "list team users"),
            Self::DeleteUser => write!(f, "delete team user"),
        }
    }
}

/// Failure talking to Lacework.
#[derive(Debug, Error)]
pub enum LaceworkError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// The platform answered with a status other than the expected one.
    #[error("{operation} returned status {status}: {body}")]
    UnexpectedStatus {
        operation: Operation,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The expected status came back with an unreadable body.
    #[error("{operation} response could not be decoded: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl LaceworkError {
    /// The call that produced this error.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Transport { operation, .. }
            | Self::UnexpectedStatus { operation, .. }
            | Self::Decode { operation, .. } => *operation,
        }
    }

    /// The HTTP status, when a response was received.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport { source, .. } | Self::Decode { source, .. } => source.status(),
        }
    }
}

impl From<LaceworkError> for AppError {
    fn from(err: LaceworkError) -> Self {
        let kind = match err.operation() {
            Operation::CreateToken => ErrorKind::AuthFailed,
            _ => ErrorKind::RemoteApi,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
