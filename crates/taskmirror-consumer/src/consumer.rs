//! The consume, persist, acknowledge loop.

use std::sync::Arc;

use taskmirror_core::store::TaskStateStore;
use taskmirror_queue::client::EventQueue;

/// The perpetual orchestration tying receive, persist, and delete together.
///
/// The queue and store are explicit dependencies constructed once at startup;
/// the loop holds no ambient global state.
pub struct Consumer {
    queue: EventQueue,
    store: Arc<dyn TaskStateStore>,
}

impl Consumer {
    /// Creates a consumer over the given queue client and store.
    #[must_use]
    pub fn new(queue: EventQueue, store: Arc<dyn TaskStateStore>) -> Self {
        Self { queue, store }
    }

    /// Runs cycles forever.
    ///
    /// There is no idle sleep; the queue's long-poll wait is the pacing
    /// mechanism. The loop ends only when the process is killed.
    pub async fn run(&self) {
        loop {
            self.cycle().await;
        }
    }

    /// One receive, persist, acknowledge cycle. Returns the number of
    /// messages acknowledged.
    ///
    /// Messages are applied in order, not concurrently: batches are small and
    /// sequential applies keep store contention trivial. A message is
    /// acknowledged only after its snapshot is durably committed, so a crash
    /// between persist and delete redelivers the message and the idempotent
    /// store absorbs the replay. A failed persist withholds acknowledgement
    /// and leaves the message for redelivery.
    pub async fn cycle(&self) -> usize {
        let batch = self.queue.receive_batch().await;
        let mut acknowledged = Vec::with_capacity(batch.len());

        for message in batch {
            match self.store.apply(&message.event.task).await {
                Ok(()) => acknowledged.push(message.receipt),
                Err(err) => {
                    tracing::warn!(
                        task_arn = %err.task_arn(),
                        message_id = %message.receipt.message_id,
                        error = %err,
                        "failed to persist task state, withholding acknowledgement"
                    );
                }
            }
        }

        self.queue.delete_batch(&acknowledged).await;
        acknowledged.len()
    }
}
