//! todo_backend - Todo list backend API
//!
//! Serves the todo collection over HTTP, backed by Postgres or by an
//! in-process map depending on `STORAGE_BACKEND`.

use std::net::SocketAddr;

use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_backend::api::{self, AppState};
use todo_backend::{db, Config, StorageBackend, TodoStore};

/// Initialize tracing/logging
///
/// `LOG_FORMAT=json` switches to structured JSON output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "todo_backend=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Build the configured repository backend
async fn build_store(config: &Config) -> anyhow::Result<(TodoStore, Option<PgPool>)> {
    match config.storage_backend {
        StorageBackend::Memory => {
            if config.is_production() {
                tracing::warn!("In-memory storage selected in production");
            }
            tracing::warn!("Using in-memory storage; todos are lost on shutdown");
            Ok((TodoStore::in_memory(), None))
        }
        StorageBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = db::connect(config).await?;
            db::verify_connection(&pool).await?;
            db::ensure_schema(&pool).await?;
            tracing::info!("Database connected successfully");

            Ok((TodoStore::postgres(pool.clone()), Some(pool)))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(
        backend = %config.storage_backend,
        environment = %config.environment,
        "Starting todo_backend server"
    );

    let (store, pool) = build_store(&config).await?;
    tracing::info!(backend = store.backend(), "Todo store ready");
    let app = api::build_router(AppState::new(store, config.base_url.clone()));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }
    tracing::info!("Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
