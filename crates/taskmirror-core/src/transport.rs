//! Queue transport abstraction.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::message::{MessageReceipt, RawMessage};

/// An at-least-once message transport.
///
/// Implementations may deliver a message more than once, out of order, or
/// delayed; callers compensate with idempotent processing. The production
/// implementation targets SQS; tests script one in memory.
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Requests up to `max_messages` messages, waiting up to `wait_seconds`
    /// for at least one to arrive before returning an empty batch.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any transport-level failure. Errors are
    /// transient by assumption; the caller decides whether to retry.
    async fn receive(
        &self,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<RawMessage>, TransportError>;

    /// Deletes all messages identified by `receipts` in one batch request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the batch was not accepted as a whole.
    /// There is no partial-batch reporting; a failed batch is retried whole.
    async fn delete_batch(&self, receipts: &[MessageReceipt]) -> Result<(), TransportError>;
}
