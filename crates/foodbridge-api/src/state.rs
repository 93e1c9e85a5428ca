//! Application state shared across all handlers.

use std::sync::Arc;

use foodbridge_core::config::AppConfig;
use foodbridge_realtime::ConnectionRegistry;
use foodbridge_service::ListingService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Live connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Listing lifecycle service.
    pub listing_service: Arc<ListingService>,
}
