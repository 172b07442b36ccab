//! Therapist Scheduling - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/scheduling cargo run --bin scheduling-api
//! ```
//!
//! See [`interface_api::config`] for the recognised environment variables.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresSchedulingAdapter};
use interface_api::{config::ApiConfig, create_router, telemetry::init_tracing};
use tokio::net::TcpListener;

/// Loads configuration, connects to the database, applies migrations and
/// serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Fails on a missing `DATABASE_URL`, an unreachable database, a failed
/// migration, or an address that cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = config.port,
        "Starting Therapist Scheduling API server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url).max_connections(config.db_max_connections))
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let port = Arc::new(PostgresSchedulingAdapter::new(pool.clone()));
    let app = create_router(port, &config);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
