//! Environment-based configuration.

use crate::error::AppError;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the queue holding task state change events.
    pub queue_url: String,
    /// `PostgreSQL` URL to store task state in.
    pub database_url: String,
    /// Maximum connections in the store pool.
    pub max_connections: u32,
}

impl Config {
    /// Reads configuration from `QUEUE_URL`, `DATABASE_URL`, and the optional
    /// `MAX_CONNECTIONS` (default 10).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        let queue_url = std::env::var("QUEUE_URL")
            .map_err(|_| AppError::Config("QUEUE_URL environment variable must be set".into()))?;
        let database_url = std::env::var("DATABASE_URL").map_err(|_| {
            AppError::Config("DATABASE_URL environment variable must be set".into())
        })?;
        let max_connections = std::env::var("MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_owned())
            .parse()
            .map_err(|e| AppError::Config(format!("MAX_CONNECTIONS must be a valid u32: {e}")))?;

        Ok(Self {
            queue_url,
            database_url,
            max_connections,
        })
    }
}
