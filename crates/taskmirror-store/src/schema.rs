//! Task store database schema.

/// SQL to create the tasks table.
///
/// One row per `task_arn`, holding the latest accepted version. Container
/// columns are a fixed-width extension of the task row: only the first
/// container of a snapshot is tracked, and an empty container list is written
/// as a synthetic empty container, so the columns are never NULL.
pub const CREATE_TASKS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
    task_arn                TEXT PRIMARY KEY,
    task_def_arn            TEXT NOT NULL,
    cluster_arn             TEXT NOT NULL,
    container_instance_arn  TEXT NOT NULL,
    created_at              TIMESTAMPTZ,
    started_at              TIMESTAMPTZ,
    stopped_at              TIMESTAMPTZ,
    stopped_reason          TEXT NOT NULL,
    desired_status          TEXT NOT NULL,
    last_status             TEXT NOT NULL,
    container_arn           TEXT NOT NULL,
    container_exit_code     BIGINT NOT NULL,
    container_last_status   TEXT NOT NULL,
    container_name          TEXT NOT NULL,
    version                 BIGINT NOT NULL
);
";
