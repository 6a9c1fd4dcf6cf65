//! Test fixtures — event and message builders with sensible defaults.

use chrono::{TimeZone, Utc};
use taskmirror_core::event::{ContainerSnapshot, StateChangeEvent, TaskState};
use taskmirror_core::message::RawMessage;

/// Builds a `TaskState` snapshot for the given task and version, with one
/// running container.
#[must_use]
pub fn task_state(task_arn: &str, version: i64) -> TaskState {
    TaskState {
        task_arn: task_arn.to_owned(),
        task_definition_arn: "arn:aws:ecs:us-east-1:1234:task-definition/web:3".to_owned(),
        cluster_arn: "arn:aws:ecs:us-east-1:1234:cluster/default".to_owned(),
        container_instance_arn: "arn:aws:ecs:us-east-1:1234:container-instance/ci".to_owned(),
        created_at: Some(Utc.with_ymd_and_hms(2026, 3, 1, 11, 59, 0).unwrap()),
        started_at: None,
        stopped_at: None,
        stopped_reason: String::new(),
        desired_status: "RUNNING".to_owned(),
        last_status: "RUNNING".to_owned(),
        containers: vec![ContainerSnapshot {
            container_arn: format!("{task_arn}/container"),
            exit_code: 0,
            last_status: "RUNNING".to_owned(),
            name: "web".to_owned(),
        }],
        version,
    }
}

/// Wraps a `TaskState` in a `StateChangeEvent` envelope.
#[must_use]
pub fn state_change_event(event_id: &str, task: TaskState) -> StateChangeEvent {
    StateChangeEvent {
        id: event_id.to_owned(),
        time: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        task,
    }
}

/// Serializes an event to the wire format consumed from the queue.
///
/// # Panics
///
/// Panics if the event fails to serialize; events built by these fixtures
/// always serialize.
#[must_use]
pub fn event_body(event: &StateChangeEvent) -> String {
    serde_json::to_string(event).expect("fixture event serializes")
}

/// Builds a `RawMessage` carrying the given body, with a receipt handle
/// derived from the message ID.
#[must_use]
pub fn raw_message(message_id: &str, body: impl Into<String>) -> RawMessage {
    RawMessage {
        message_id: message_id.to_owned(),
        receipt_handle: format!("receipt-{message_id}"),
        body: body.into(),
    }
}
