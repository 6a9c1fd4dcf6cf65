//! Consumer process errors.
//!
//! Startup failures are the only fatal error class: an unreachable store or
//! missing configuration at boot signals misconfiguration, not a transient
//! condition, so the process exits instead of retrying.

use thiserror::Error;

/// Startup errors for the consumer process.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
