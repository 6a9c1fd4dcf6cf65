//! Queue client — perpetual-retry receive and delete, plus body decoding.

use std::sync::Arc;

use taskmirror_core::message::{MessageReceipt, QueueMessage, RawMessage};
use taskmirror_core::transport::QueueTransport;

use crate::retry::RetryPolicy;

/// Maximum messages requested per receive. The SQS-enforced maximum is 10.
const MAX_MESSAGES: i32 = 10;

/// Long-poll wait per receive request, in seconds. The SQS-enforced maximum
/// is 20. A full wait with nothing queued yields an empty batch, which also
/// paces the consumer loop when the queue is idle.
const WAIT_SECONDS: i32 = 20;

/// A reliable queue client over an at-least-once transport.
///
/// Neither operation ever returns an error: transient transport failures are
/// retried forever under the injected [`RetryPolicy`]. Redundant receives and
/// delayed deletes are safe because the store applies snapshots idempotently.
pub struct EventQueue {
    transport: Arc<dyn QueueTransport>,
    policy: RetryPolicy,
}

impl EventQueue {
    /// Creates a queue client over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn QueueTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Receives the next batch of decodable messages.
    ///
    /// Blocks until the transport yields a response, retrying the whole
    /// receive on error with exponential backoff. The returned batch may be
    /// empty. Messages whose bodies fail to decode are logged and dropped;
    /// they are never acknowledged, and this consumer will drop them
    /// identically on every redelivery.
    pub async fn receive_batch(&self) -> Vec<QueueMessage> {
        let mut backoff = self.policy.backoff();

        let raw = loop {
            match self.transport.receive(MAX_MESSAGES, WAIT_SECONDS).await {
                Ok(raw) => break raw,
                Err(err) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(error = %err, ?delay, "receive failed, backing off");
                    tokio::time::sleep(delay).await;
                }
            }
        };

        decode_batch(raw)
    }

    /// Deletes the given messages from the transport in one batch.
    ///
    /// Returns immediately on an empty input. On transport error the whole
    /// batch is retried with exponential backoff until the transport accepts
    /// it; there is no partial-batch handling.
    pub async fn delete_batch(&self, receipts: &[MessageReceipt]) {
        if receipts.is_empty() {
            return;
        }

        let mut backoff = self.policy.backoff();

        loop {
            match self.transport.delete_batch(receipts).await {
                Ok(()) => break,
                Err(err) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(error = %err, ?delay, "delete failed, backing off");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Decodes raw bodies into events, dropping the ones that fail.
fn decode_batch(raw: Vec<RawMessage>) -> Vec<QueueMessage> {
    let mut messages = Vec::with_capacity(raw.len());

    for raw_message in raw {
        match serde_json::from_str(&raw_message.body) {
            Ok(event) => messages.push(QueueMessage {
                receipt: MessageReceipt::from(&raw_message),
                event,
            }),
            Err(err) => {
                tracing::warn!(
                    message_id = %raw_message.message_id,
                    error = %err,
                    "dropping message with undecodable body"
                );
            }
        }
    }

    messages
}
