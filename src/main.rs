//! Foodbridge Server — surplus-food donation coordination.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use foodbridge_api::{build_router, AppState};
use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;
use foodbridge_realtime::{ConnectionRegistry, EventBus};
use foodbridge_service::ListingService;
use foodbridge_store::{JsonFileStore, ListingStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("FOODBRIDGE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Foodbridge v{}", env!("CARGO_PKG_VERSION"));
    let config = Arc::new(config);

    tracing::info!(path = %config.store.path, "Opening document store...");
    let docs = Arc::new(JsonFileStore::open(config.store.path.clone()).await?);
    let listing_store = Arc::new(ListingStore::new(docs));

    let registry = Arc::new(ConnectionRegistry::new(
        config.realtime.channel_buffer_size,
    ));
    let bus = Arc::new(EventBus::new(registry.clone()));

    let listing_service = Arc::new(ListingService::new(
        listing_store,
        bus,
        config.realtime.lifecycle_notifications,
    ));

    let state = AppState {
        config: config.clone(),
        registry,
        listing_service,
    };
    let router = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
