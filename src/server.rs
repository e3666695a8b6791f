//! HTTP server initialization and runtime setup.
//!
//! Handles storage bootstrap, metrics recorder installation and the Axum
//! server lifecycle.

use crate::application::services::ShortenOptions;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::domain::{LinkObserver, NoopObserver};
use crate::infrastructure::metrics::{MetricsObserver, install_recorder};
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::HexCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The link store (PostgreSQL with migrations, or in-memory)
/// - Prometheus recorder (when enabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = build_repository(&config).await?;

    let (observer, metrics_handle) = if config.metrics_enabled {
        let handle = install_recorder().context("Failed to install metrics recorder")?;
        tracing::info!("Metrics enabled at /metrics");
        (Arc::new(MetricsObserver) as Arc<dyn LinkObserver>, Some(handle))
    } else {
        tracing::info!("Metrics disabled");
        (Arc::new(NoopObserver) as Arc<dyn LinkObserver>, None)
    };

    let options = ShortenOptions {
        code_length: config.code_length,
        max_attempts: config.max_attempts,
        store_error_policy: config.store_error_policy,
    };

    let state = AppState::new(
        link_repository,
        Arc::new(HexCodeGenerator),
        observer,
        options,
        &config.short_url_base,
    )
    .with_metrics(metrics_handle);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = connect_pool(config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Links table initialized");

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; links are lost on restart");
            Ok(Arc::new(InMemoryLinkRepository::new()))
        }
    }
}

/// Opens the PostgreSQL pool, retrying at a fixed interval while the
/// database is not yet reachable.
///
/// # Errors
///
/// Returns an error if `database_url` is missing or every attempt fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = FixedInterval::from_millis(config.db_connect_retry_delay_ms)
        .take(config.db_connect_retries);

    let pool = Retry::start(strategy, || {
        let options = options.clone();
        async move {
            options
                .connect(database_url)
                .await
                .inspect_err(|e| tracing::warn!("Database connection failed: {}", e))
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
