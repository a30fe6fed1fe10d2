//! Entry point for the jotbin-server binary.

use std::sync::Arc;

use jotbin_server::{
    config::{ServerConfig, StoreBackend},
    state::AppState,
    transport,
};
use jotbin_store::{MemoryStore, PgConfig, PgStore, StoreAdapter, TableConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting jotbin-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, store_backend={:?}",
        config.port,
        config.log_level,
        config.store_backend
    );

    // Construct the configured store adapter and its table configuration
    let (store, tables): (Arc<dyn StoreAdapter>, TableConfig) = match config.store_backend {
        StoreBackend::Postgres => {
            let tables = TableConfig::from_env()?;
            let store_config = PgConfig::from_env()?;
            let store = PgStore::connect(store_config).await?;
            tracing::info!("Connected to database");
            (Arc::new(store), tables)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; state is lost on shutdown");
            let tables = TableConfig::from_env().unwrap_or_default();
            (Arc::new(MemoryStore::new()), tables)
        }
    };

    // Build application state
    let state = AppState::new(store, tables);

    // Build router with middleware
    let app = transport::build_router(state).layer(TraceLayer::new_for_http());

    // Create listener
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
