//! Transport message envelopes.

use crate::event::StateChangeEvent;

/// A message as handed over by the transport, body not yet decoded.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Transport-assigned message identifier.
    pub message_id: String,
    /// Opaque handle required to delete this delivery of the message.
    pub receipt_handle: String,
    /// The undecoded message body.
    pub body: String,
}

/// The pair of opaque handles needed to acknowledge (delete) one message.
///
/// The receipt handle identifies this particular delivery; redelivery of the
/// same message carries a fresh handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReceipt {
    /// Transport-assigned message identifier.
    pub message_id: String,
    /// Opaque handle required to delete this delivery.
    pub receipt_handle: String,
}

impl From<&RawMessage> for MessageReceipt {
    fn from(raw: &RawMessage) -> Self {
        Self {
            message_id: raw.message_id.clone(),
            receipt_handle: raw.receipt_handle.clone(),
        }
    }
}

/// A received message whose body decoded into a [`StateChangeEvent`].
#[derive(Debug, Clone)]
pub struct QueueMessage {
    /// Handles needed to acknowledge this message after a successful persist.
    pub receipt: MessageReceipt,
    /// The decoded event.
    pub event: StateChangeEvent,
}
