//! Task state store abstraction.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::event::TaskState;

/// Persistent store of the latest known state per task.
///
/// `apply` must be idempotent and version-gated: applying the same snapshot
/// twice, or applying a snapshot older than the one already stored for the
/// same `task_arn`, is a success no-op. The consumer loop relies on this to
/// make at-least-once delivery exactly-once effective.
#[async_trait]
pub trait TaskStateStore: Send + Sync {
    /// Applies a task state snapshot under the replace-if-newer rule.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write could not be committed. The store
    /// performs no internal retry; retry-or-abandon is the caller's decision.
    async fn apply(&self, state: &TaskState) -> Result<(), StoreError>;
}
