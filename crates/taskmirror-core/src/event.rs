//! Task state change events as emitted by the upstream orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task state change event, deserialized directly from a queue message body.
///
/// Unknown fields in the body are ignored; a missing or mistyped required
/// field fails deserialization of the whole event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateChangeEvent {
    /// Opaque identifier unique to this event instance. Not an ordering key.
    pub id: String,
    /// When the state change occurred.
    pub time: DateTime<Utc>,
    /// The new state of the task.
    #[serde(rename = "detail")]
    pub task: TaskState,
}

/// The state of a task at a point in time.
///
/// Snapshots for the same `task_arn` are totally ordered by `version`, which
/// the upstream orchestrator increments on every state change. `version` is
/// the sole key used for conflict resolution; arrival order means nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    /// ARN of the task. Uniquely identifies the task across its lifecycle.
    pub task_arn: String,
    /// ARN of the task definition this task was launched from.
    pub task_definition_arn: String,
    /// ARN of the cluster that hosts the task.
    pub cluster_arn: String,
    /// ARN of the container instance that hosts the task.
    pub container_instance_arn: String,
    /// When the task entered the PENDING state. Set at most once.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the task transitioned from PENDING to RUNNING. Set at most once.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the task was stopped. Set at most once.
    #[serde(default)]
    pub stopped_at: Option<DateTime<Utc>>,
    /// The reason the task stopped. Empty until the task stops.
    #[serde(default)]
    pub stopped_reason: String,
    /// The status the orchestrator is driving the task towards.
    pub desired_status: String,
    /// The last known status of the task.
    pub last_status: String,
    /// Containers belonging to the task, possibly empty.
    #[serde(default)]
    pub containers: Vec<ContainerSnapshot>,
    /// Monotonically increasing version counter assigned upstream.
    pub version: i64,
}

impl TaskState {
    /// Returns the container whose fields are persisted alongside the task
    /// row: the first container, or a synthetic empty snapshot when the task
    /// reports none.
    ///
    /// Only one container per task is durably tracked. This is a deliberate
    /// simplification for single-container tasks; remaining containers are
    /// discarded, and the store never leaves the container columns unset.
    #[must_use]
    pub fn first_container(&self) -> ContainerSnapshot {
        self.containers.first().cloned().unwrap_or_default()
    }
}

/// A point-in-time view of one container belonging to a task.
///
/// Carries no identity or lifecycle of its own beyond its parent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSnapshot {
    /// ARN of the container.
    pub container_arn: String,
    /// Exit code returned from the container. Zero until the container exits.
    #[serde(default)]
    pub exit_code: i64,
    /// The last known status of the container.
    pub last_status: String,
    /// Name of the container within its task definition.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_event_body() -> &'static str {
        r#"{
            "id": "event-1",
            "time": "2026-03-01T12:00:00Z",
            "detail": {
                "taskArn": "arn:aws:ecs:us-east-1:1234:task/abc",
                "taskDefinitionArn": "arn:aws:ecs:us-east-1:1234:task-definition/web:3",
                "clusterArn": "arn:aws:ecs:us-east-1:1234:cluster/default",
                "containerInstanceArn": "arn:aws:ecs:us-east-1:1234:container-instance/xyz",
                "createdAt": "2026-03-01T11:59:00Z",
                "startedAt": null,
                "stoppedAt": null,
                "stoppedReason": "",
                "desiredStatus": "RUNNING",
                "lastStatus": "PENDING",
                "containers": [
                    {
                        "containerArn": "arn:aws:ecs:us-east-1:1234:container/c1",
                        "exitCode": 0,
                        "lastStatus": "PENDING",
                        "name": "web"
                    }
                ],
                "version": 1
            }
        }"#
    }

    #[test]
    fn test_decodes_full_event() {
        let event: StateChangeEvent = serde_json::from_str(full_event_body()).unwrap();

        assert_eq!(event.id, "event-1");
        assert_eq!(event.task.task_arn, "arn:aws:ecs:us-east-1:1234:task/abc");
        assert_eq!(event.task.last_status, "PENDING");
        assert_eq!(event.task.version, 1);
        assert_eq!(event.task.containers.len(), 1);
        assert_eq!(event.task.containers[0].name, "web");
        assert!(event.task.started_at.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{
            "id": "event-2",
            "time": "2026-03-01T12:00:00Z",
            "source": "aws.ecs",
            "region": "us-east-1",
            "detail": {
                "taskArn": "arn:task",
                "taskDefinitionArn": "arn:def",
                "clusterArn": "arn:cluster",
                "containerInstanceArn": "arn:instance",
                "desiredStatus": "RUNNING",
                "lastStatus": "RUNNING",
                "launchType": "EC2",
                "version": 4
            }
        }"#;

        let event: StateChangeEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.task.version, 4);
    }

    #[test]
    fn test_omitted_optional_fields_default() {
        let body = r#"{
            "id": "event-3",
            "time": "2026-03-01T12:00:00Z",
            "detail": {
                "taskArn": "arn:task",
                "taskDefinitionArn": "arn:def",
                "clusterArn": "arn:cluster",
                "containerInstanceArn": "arn:instance",
                "desiredStatus": "RUNNING",
                "lastStatus": "PENDING",
                "version": 1
            }
        }"#;

        let event: StateChangeEvent = serde_json::from_str(body).unwrap();
        assert!(event.task.created_at.is_none());
        assert!(event.task.stopped_at.is_none());
        assert_eq!(event.task.stopped_reason, "");
        assert!(event.task.containers.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        // No "version" in detail.
        let body = r#"{
            "id": "event-4",
            "time": "2026-03-01T12:00:00Z",
            "detail": {
                "taskArn": "arn:task",
                "taskDefinitionArn": "arn:def",
                "clusterArn": "arn:cluster",
                "containerInstanceArn": "arn:instance",
                "desiredStatus": "RUNNING",
                "lastStatus": "PENDING"
            }
        }"#;

        assert!(serde_json::from_str::<StateChangeEvent>(body).is_err());
    }

    #[test]
    fn test_mistyped_field_fails() {
        let body = r#"{
            "id": "event-5",
            "time": "2026-03-01T12:00:00Z",
            "detail": {
                "taskArn": "arn:task",
                "taskDefinitionArn": "arn:def",
                "clusterArn": "arn:cluster",
                "containerInstanceArn": "arn:instance",
                "desiredStatus": "RUNNING",
                "lastStatus": "PENDING",
                "version": "not-a-number"
            }
        }"#;

        assert!(serde_json::from_str::<StateChangeEvent>(body).is_err());
    }

    #[test]
    fn test_first_container_returns_first_of_many() {
        let event: StateChangeEvent = serde_json::from_str(full_event_body()).unwrap();
        let mut task = event.task;
        task.containers.push(ContainerSnapshot {
            container_arn: "arn:container/second".into(),
            exit_code: 137,
            last_status: "STOPPED".into(),
            name: "sidecar".into(),
        });

        assert_eq!(task.first_container().name, "web");
    }

    #[test]
    fn test_first_container_synthesizes_empty_snapshot() {
        let event: StateChangeEvent = serde_json::from_str(full_event_body()).unwrap();
        let mut task = event.task;
        task.containers.clear();

        let container = task.first_container();
        assert_eq!(container, ContainerSnapshot::default());
        assert_eq!(container.container_arn, "");
        assert_eq!(container.exit_code, 0);
    }
}
