//! Taskmirror Queue — reliable batch receive and delete over an
//! at-least-once transport.
//!
//! [`client::EventQueue`] hides transient transport failures from the
//! consumer loop by retrying forever under an injected [`retry::RetryPolicy`];
//! [`sqs::SqsTransport`] is the production transport.

pub mod client;
pub mod retry;
pub mod sqs;
