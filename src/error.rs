//! Error types for mysql-session.
//!
//! Defines the main error enum used throughout the crate. Note that a query
//! the server rejects is *not* an error: it comes back as a failed
//! [`QueryResult`](crate::session::QueryResult).

use thiserror::Error;

/// Main error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session never obtained both a user and a password and refuses
    /// to run queries.
    #[error("Can't run MySQL SQL checks without authentication")]
    MissingAuthentication,

    /// The shell running the mysql client could not be started.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration errors (invalid config file, unknown connection, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SessionError {
    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error means the session is permanently unusable.
    pub fn is_missing_authentication(&self) -> bool {
        matches!(self, Self::MissingAuthentication)
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingAuthentication => "Authentication Error",
            Self::Execution(_) => "Execution Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;
