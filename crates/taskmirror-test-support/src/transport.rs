//! Scripted transport — a `QueueTransport` driven by a queue of canned
//! responses, recording every delete.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use taskmirror_core::error::TransportError;
use taskmirror_core::message::{MessageReceipt, RawMessage};
use taskmirror_core::transport::QueueTransport;

/// A transport whose `receive` pops pre-scripted responses in order and whose
/// `delete_batch` can be made to fail a fixed number of times before
/// succeeding. Once the receive script is exhausted, further receives return
/// empty batches.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    receives: Mutex<VecDeque<Result<Vec<RawMessage>, TransportError>>>,
    delete_failures: Mutex<u32>,
    deleted: Mutex<Vec<Vec<MessageReceipt>>>,
    receive_attempts: Mutex<u32>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful receive returning `messages`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push_receive(&self, messages: Vec<RawMessage>) {
        self.receives.lock().unwrap().push_back(Ok(messages));
    }

    /// Appends a failing receive.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn push_receive_error(&self, message: &str) {
        self.receives
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_owned())));
    }

    /// Makes the next `failures` delete batches fail before deletes succeed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fail_deletes(&self, failures: u32) {
        *self.delete_failures.lock().unwrap() = failures;
    }

    /// Every delete batch that was accepted, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn deleted_batches(&self) -> Vec<Vec<MessageReceipt>> {
        self.deleted.lock().unwrap().clone()
    }

    /// Number of `receive` calls made, including failed ones.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn receive_attempts(&self) -> u32 {
        *self.receive_attempts.lock().unwrap()
    }
}

#[async_trait]
impl QueueTransport for ScriptedTransport {
    async fn receive(
        &self,
        _max_messages: i32,
        _wait_seconds: i32,
    ) -> Result<Vec<RawMessage>, TransportError> {
        *self.receive_attempts.lock().unwrap() += 1;
        self.receives
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn delete_batch(&self, receipts: &[MessageReceipt]) -> Result<(), TransportError> {
        {
            let mut failures = self.delete_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(TransportError("delete rejected".to_owned()));
            }
        }
        self.deleted.lock().unwrap().push(receipts.to_vec());
        Ok(())
    }
}
