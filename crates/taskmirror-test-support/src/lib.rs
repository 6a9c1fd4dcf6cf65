//! Shared test mocks and fixtures for the taskmirror consumer.

mod fixtures;
mod store;
mod transport;

pub use fixtures::{event_body, raw_message, state_change_event, task_state};
pub use store::{FailingTaskStore, InMemoryTaskStore, OutageTaskStore};
pub use transport::ScriptedTransport;
