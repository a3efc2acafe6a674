//! Payables worker daemon
//!
//! Drains the payment task queue and runs the hourly overdue sweep.
//!
//! # Environment Variables
//!
//! * `WORKER_DATABASE_URL` - PostgreSQL connection string
//! * `WORKER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `WORKER_QUEUE_SIZE` - Task channel capacity (default: 256)
//! * `WORKER_WORKER_COUNT` - Concurrent task processors (default: 4)
//! * `WORKER_MAX_ATTEMPTS` - Delivery attempts per task (default: 5)
//! * `WORKER_RETRY_BASE_DELAY_MS` - Redelivery backoff base (default: 100)
//! * `WORKER_SWEEP_INTERVAL_SECS` - Seconds between overdue sweeps (default: 3600)

mod config;
mod settlement;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_payment::{
    OverdueSweeper, PaymentProcessor, PaymentQuery, PaymentStatus, PaymentStore, TaskQueue,
};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresPaymentStore};
use infra_queue::{SweepScheduler, WorkerPool};

use crate::config::WorkerConfig;
use crate::settlement::RecordingSettlementGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        worker_count = config.worker_count,
        sweep_interval_secs = config.sweep_interval_secs,
        "starting payables worker"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url))
        .await
        .context("failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let store = Arc::new(PostgresPaymentStore::new(pool));
    let gateway = Arc::new(RecordingSettlementGateway::new());
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway));

    let worker_pool = WorkerPool::new(config.queue_config(), processor);
    let queue = worker_pool.queue();
    let pool_shutdown = worker_pool.shutdown_token();
    let pool_handle = worker_pool.start();

    // The channel is in-process and not durable, so pending payments left
    // over from a previous run are re-enqueued at startup.
    let pending = store
        .list(&PaymentQuery::by_status(PaymentStatus::Pending))
        .await
        .context("failed to list pending payments")?;
    for payment in &pending {
        if let Err(err) = queue.enqueue_process(payment.id).await {
            tracing::warn!(payment_id = %payment.id, %err, "could not requeue pending payment");
        }
    }
    tracing::info!(count = pending.len(), "pending payments requeued");

    let scheduler = SweepScheduler::new(
        OverdueSweeper::new(store),
        config.queue_config().sweep_interval(),
    );
    let scheduler_shutdown = scheduler.shutdown_token();
    let scheduler_handle = scheduler.start();

    shutdown_signal().await;
    tracing::info!("shutdown signal received");

    pool_shutdown.cancel();
    scheduler_shutdown.cancel();
    pool_handle.await.ok();
    scheduler_handle.await.ok();

    tracing::info!("worker shutdown complete");
    Ok(())
}

/// Loads configuration from the environment, falling back to defaults
fn load_config() -> WorkerConfig {
    WorkerConfig::from_env().unwrap_or_else(|_| {
        let defaults = WorkerConfig::default();
        WorkerConfig {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("WORKER_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("WORKER_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            ..defaults
        }
    })
}

/// Initializes the tracing subscriber for structured logging
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .ok();
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
