//! Taskmirror Store — `PostgreSQL` persistence for task state snapshots.

pub mod pg_task_store;
pub mod schema;
