//! Credit Application System - customer credit request backend
//!
//! Customers sign up and request credits; each credit is tied to exactly
//! one customer and can be listed or looked up by its code.

use std::net::SocketAddr;
use std::sync::Arc;

use credit_application_system::api::{self, AppState};
use credit_application_system::config::{LogFormat, StorageBackend};
use credit_application_system::repository::{
    InMemoryStore, PgCreditRepository, PgCustomerRepository,
};
use credit_application_system::{db, Config};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "credit_application_system=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Connect to PostgreSQL and verify the schema is in place
async fn connect_postgres(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;

    tracing::info!("Connecting to database...");
    let pool = db::connect(database_url, config.database_max_connections).await?;
    db::verify_connection(&pool).await?;

    if !db::check_schema(&pool).await? {
        tracing::error!("Database schema is not complete. Please run migrations.");
        return Err(anyhow::anyhow!("Database schema incomplete"));
    }

    tracing::info!("Database connected successfully");
    Ok(pool)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(environment = %config.environment, "Starting credit application system");

    let (state, pool) = match config.storage {
        StorageBackend::Postgres => {
            let pool = connect_postgres(&config).await?;
            let state = AppState::new(
                Arc::new(PgCustomerRepository::new(pool.clone())),
                Arc::new(PgCreditRepository::new(pool.clone())),
            );
            (state, Some(pool))
        }
        StorageBackend::Memory => {
            if config.is_production() {
                tracing::warn!("In-memory storage in production: data is lost on restart");
            }
            (AppState::in_memory(InMemoryStore::new()), None)
        }
    };

    let app = api::build_router(state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
