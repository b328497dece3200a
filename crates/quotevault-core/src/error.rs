//! Core error types for quotevault-core.
//!
//! The library distinguishes three recoverable failure families:
//! upstream data that cannot be obtained (`NotAvailable`), local
//! persistence failures (`Persistence`/`Database`), and backend/HTTP
//! failures (`Backend`). None of them is fatal to a caller -- every
//! feature degrades to "silently unavailable today".
//!
//! Denied notification permission is deliberately NOT an error; see
//! [`crate::notify::ScheduleOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quotevault-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Upstream quote data (count or a specific quote) cannot be obtained.
    /// Callers skip the dependent operation and leave prior state intact.
    #[error("quote data not available: {0}")]
    NotAvailable(String),

    /// A local file or key/value write/read failed. Logged and treated
    /// as absent/no-op by callers, never shown to the user.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Database-related errors
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Hosted backend request errors
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Authentication / credential storage errors
    #[error("auth error: {0}")]
    Auth(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors from the hosted quote backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend base URL is not configured.
    #[error("backend not configured (set backend.base_url)")]
    NotConfigured,

    /// Request could not be sent (network unreachable, TLS, DNS).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status} from backend: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            BackendError::Request(err.to_string())
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
