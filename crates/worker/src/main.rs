use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coldwatch_events::EventBus;
use coldwatch_monitor::{AlertService, ViolationWorker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coldwatch_worker=debug,coldwatch_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = coldwatch_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    coldwatch_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    coldwatch_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let bus = Arc::new(EventBus::default());
    let receiver = bus.subscribe();
    let worker = ViolationWorker::new(AlertService::new(pool.clone(), bus.clone()));

    let cancel = CancellationToken::new();
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            cancel_on_signal.cancel();
        }
    });

    tracing::info!("Violation worker started");
    worker.run(receiver, cancel).await;

    Ok(())
}
