//! `PostgreSQL` implementation of the `TaskStateStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use taskmirror_core::error::StoreError;
use taskmirror_core::event::TaskState;
use taskmirror_core::store::TaskStateStore;

/// Conditional upsert implementing the replace-if-newer policy.
///
/// The version gate lives in the `WHERE` clause of the conflict action, so the
/// check and the write execute as one atomic statement; two consumers racing
/// on the same `task_arn` cannot lose an update, and a crash mid-statement
/// leaves the prior row intact.
const APPLY_TASK_STATE: &str = "
INSERT INTO tasks
    (task_arn, task_def_arn, cluster_arn, container_instance_arn, created_at,
    started_at, stopped_at, stopped_reason, desired_status, last_status,
    container_arn, container_exit_code, container_last_status,
    container_name, version)
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
ON CONFLICT (task_arn) DO UPDATE SET
    task_def_arn = EXCLUDED.task_def_arn,
    cluster_arn = EXCLUDED.cluster_arn,
    container_instance_arn = EXCLUDED.container_instance_arn,
    created_at = EXCLUDED.created_at,
    started_at = EXCLUDED.started_at,
    stopped_at = EXCLUDED.stopped_at,
    stopped_reason = EXCLUDED.stopped_reason,
    desired_status = EXCLUDED.desired_status,
    last_status = EXCLUDED.last_status,
    container_arn = EXCLUDED.container_arn,
    container_exit_code = EXCLUDED.container_exit_code,
    container_last_status = EXCLUDED.container_last_status,
    container_name = EXCLUDED.container_name,
    version = EXCLUDED.version
WHERE tasks.version < EXCLUDED.version
";

/// `PostgreSQL`-backed task state store.
///
/// Keeps exactly one row per `task_arn`: the snapshot with the highest version
/// accepted so far. Duplicate and stale snapshots are success no-ops, which
/// makes `apply` safe under at-least-once delivery in any arrival order.
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    /// Creates a new `PgTaskStore` over a shared connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStateStore for PgTaskStore {
    async fn apply(&self, state: &TaskState) -> Result<(), StoreError> {
        let container = state.first_container();

        let result = sqlx::query(APPLY_TASK_STATE)
            .bind(&state.task_arn)
            .bind(&state.task_definition_arn)
            .bind(&state.cluster_arn)
            .bind(&state.container_instance_arn)
            .bind(state.created_at)
            .bind(state.started_at)
            .bind(state.stopped_at)
            .bind(&state.stopped_reason)
            .bind(&state.desired_status)
            .bind(&state.last_status)
            .bind(&container.container_arn)
            .bind(container.exit_code)
            .bind(&container.last_status)
            .bind(&container.name)
            .bind(state.version)
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::Persistence {
                task_arn: state.task_arn.clone(),
                message: err.to_string(),
            })?;

        tracing::debug!(
            task_arn = %state.task_arn,
            version = state.version,
            written = result.rows_affected() > 0,
            "applied task state"
        );

        Ok(())
    }
}
