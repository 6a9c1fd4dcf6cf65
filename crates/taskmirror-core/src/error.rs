//! Domain error types.

use thiserror::Error;

/// Error returned by a [`crate::transport::QueueTransport`] operation.
///
/// Transport errors are always transient from the consumer's point of view:
/// the queue client recovers from them locally by retrying and never surfaces
/// them to the consumer loop.
#[derive(Debug, Error)]
#[error("transport request failed: {0}")]
pub struct TransportError(pub String);

/// Error returned by a [`crate::store::TaskStateStore`] write.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database rejected or failed the write.
    #[error("failed to persist task {task_arn}: {message}")]
    Persistence {
        /// The task whose snapshot could not be persisted.
        task_arn: String,
        /// Driver-level failure description.
        message: String,
    },
}

impl StoreError {
    /// The `task_arn` the failed write was for.
    #[must_use]
    pub fn task_arn(&self) -> &str {
        match self {
            Self::Persistence { task_arn, .. } => task_arn,
        }
    }
}
