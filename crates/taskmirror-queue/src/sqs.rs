//! SQS-backed `QueueTransport`.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::DeleteMessageBatchRequestEntry;

use taskmirror_core::error::TransportError;
use taskmirror_core::message::{MessageReceipt, RawMessage};
use taskmirror_core::transport::QueueTransport;

/// `QueueTransport` implementation over one SQS queue.
#[derive(Debug, Clone)]
pub struct SqsTransport {
    client: Client,
    queue_url: String,
}

impl SqsTransport {
    /// Connects using the ambient AWS configuration (environment, shared
    /// profile, or instance role).
    pub async fn connect(queue_url: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), queue_url)
    }

    /// Creates a transport over an existing SQS client.
    #[must_use]
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueueTransport for SqsTransport {
    async fn receive(
        &self,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<RawMessage>, TransportError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_seconds)
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        let raw = output
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| {
                Some(RawMessage {
                    message_id: message.message_id?,
                    receipt_handle: message.receipt_handle?,
                    body: message.body?,
                })
            })
            .collect();

        Ok(raw)
    }

    async fn delete_batch(&self, receipts: &[MessageReceipt]) -> Result<(), TransportError> {
        let mut request = self.client.delete_message_batch().queue_url(&self.queue_url);

        for receipt in receipts {
            let entry = DeleteMessageBatchRequestEntry::builder()
                .id(&receipt.message_id)
                .receipt_handle(&receipt.receipt_handle)
                .build()
                .map_err(|err| TransportError(err.to_string()))?;
            request = request.entries(entry);
        }

        let output = request
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        // A partially failed batch is retried whole by the caller.
        if output.failed.is_empty() {
            Ok(())
        } else {
            Err(TransportError(format!(
                "{} of {} delete entries failed",
                output.failed.len(),
                receipts.len()
            )))
        }
    }
}
