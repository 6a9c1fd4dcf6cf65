//! Integration tests for `PgTaskStore`. Require a running `PostgreSQL`
//! (standard `sqlx::test` setup via `DATABASE_URL`).

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use taskmirror_core::store::TaskStateStore;
use taskmirror_store::pg_task_store::PgTaskStore;
use taskmirror_test_support::task_state;

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    last_status: String,
    container_arn: String,
    container_exit_code: i64,
    container_name: String,
    version: i64,
}

async fn fetch_task(pool: &PgPool, task_arn: &str) -> Option<TaskRow> {
    sqlx::query_as::<_, TaskRow>(
        "SELECT last_status, container_arn, container_exit_code, container_name, version
         FROM tasks WHERE task_arn = $1",
    )
    .bind(task_arn)
    .fetch_optional(pool)
    .await
    .unwrap()
}

async fn count_rows(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_first_apply_inserts_one_row(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());

    store.apply(&task_state("arn:task/a", 1)).await.unwrap();

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.version, 1);
    assert_eq!(row.last_status, "RUNNING");
    assert_eq!(count_rows(&pool).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_apply_is_idempotent(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());
    let state = task_state("arn:task/a", 1);

    store.apply(&state).await.unwrap();
    store.apply(&state).await.unwrap();

    assert_eq!(count_rows(&pool).await, 1);
    assert_eq!(fetch_task(&pool, "arn:task/a").await.unwrap().version, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_newer_version_replaces_row(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());
    store.apply(&task_state("arn:task/a", 1)).await.unwrap();

    let mut stopped = task_state("arn:task/a", 2);
    stopped.last_status = "STOPPED".to_owned();
    stopped.stopped_at = Some(Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap());
    stopped.containers[0].exit_code = 137;
    store.apply(&stopped).await.unwrap();

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.version, 2);
    assert_eq!(row.last_status, "STOPPED");
    assert_eq!(row.container_exit_code, 137);
    assert_eq!(count_rows(&pool).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_stale_version_is_a_success_no_op(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());
    store.apply(&task_state("arn:task/a", 1)).await.unwrap();

    let mut stale = task_state("arn:task/a", 0);
    stale.last_status = "PENDING".to_owned();
    store.apply(&stale).await.unwrap();

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.version, 1);
    assert_eq!(row.last_status, "RUNNING");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_out_of_order_applies_converge_to_max_version(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());

    for version in [3, 1, 4, 2] {
        store.apply(&task_state("arn:task/a", version)).await.unwrap();
    }

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.version, 4);
    assert_eq!(count_rows(&pool).await, 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_empty_containers_persist_as_synthetic_empty_row(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());
    let mut state = task_state("arn:task/a", 1);
    state.containers.clear();

    store.apply(&state).await.unwrap();

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.container_arn, "");
    assert_eq!(row.container_exit_code, 0);
    assert_eq!(row.container_name, "");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_only_first_container_is_persisted(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());
    let mut state = task_state("arn:task/a", 1);
    state.containers.push(state.containers[0].clone());
    state.containers[1].name = "sidecar".to_owned();

    store.apply(&state).await.unwrap();

    let row = fetch_task(&pool, "arn:task/a").await.unwrap();
    assert_eq!(row.container_name, "web");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_tasks_are_tracked_independently(pool: PgPool) {
    let store = PgTaskStore::new(pool.clone());

    store.apply(&task_state("arn:task/a", 5)).await.unwrap();
    store.apply(&task_state("arn:task/b", 1)).await.unwrap();

    assert_eq!(count_rows(&pool).await, 2);
    assert_eq!(fetch_task(&pool, "arn:task/a").await.unwrap().version, 5);
    assert_eq!(fetch_task(&pool, "arn:task/b").await.unwrap().version, 1);
}
