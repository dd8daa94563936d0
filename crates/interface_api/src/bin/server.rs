//! ISA Investment API - Server Binary
//!
//! # Usage
//!
//! ```bash
//! API_DATABASE_URL=postgres://localhost/isa cargo run --bin isa-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level or filter directive (default: info)
//! * `API_LOG_FORMAT` - `text` or `json` (default: text)
//! * `API_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_OPERATION_TIMEOUT_MS` - Deadline per investment operation (default: 5000)
//! * `API_REQUEST_TIMEOUT_SECS` - Deadline per HTTP request (default: 60)
//! * `API_SINGLE_FUND_ONLY` - Restrict customers to one fund (default: true)
//! * `API_AGGREGATE_REFRESH` - `affected` or `full` (default: affected)
//! * `API_RUN_MIGRATIONS` - Apply migrations at startup (default: true)
//! * `API_HEALTH_CHECK_INTERVAL_SECS` - Database health check period (default: 30)

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_db::{create_pool, run_migrations, spawn_health_monitor};
use interface_api::{create_router, ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API_ configuration")?;

    init_tracing(&config);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        single_fund_only = config.single_fund_only,
        aggregate_refresh = ?config.aggregate_refresh,
        "Starting ISA investment API server"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("failed to create database pool")?;

    if config.run_migrations {
        run_migrations(&pool).await.context("failed to run migrations")?;
    }

    let monitor = spawn_health_monitor(pool.clone(), config.health_check_interval());

    let app = create_router(pool.clone(), config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    monitor.abort();
    pool.close().await;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber, as JSON when `API_LOG_FORMAT=json`
fn init_tracing(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = config.json_logs();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_target(true)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(true)))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
