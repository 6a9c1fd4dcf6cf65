//! Taskmirror consumer entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use taskmirror_consumer::config::Config;
use taskmirror_consumer::consumer::Consumer;
use taskmirror_consumer::error::AppError;
use taskmirror_queue::client::EventQueue;
use taskmirror_queue::retry::RetryPolicy;
use taskmirror_queue::sqs::SqsTransport;
use taskmirror_store::pg_task_store::PgTaskStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting taskmirror consumer");

    let config = Config::from_env()?;

    // Create database connection pool and fail fast on store
    // misconfiguration instead of on the first event.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;

    let transport = Arc::new(SqsTransport::connect(&config.queue_url).await);
    let queue = EventQueue::new(transport, RetryPolicy::default());
    let store = Arc::new(PgTaskStore::new(pool));

    tracing::info!(queue_url = %config.queue_url, "consuming task state change events");

    Consumer::new(queue, store).run().await;

    Ok(())
}
