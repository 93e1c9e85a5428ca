//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use foodbridge_api::{build_router, AppState};
use foodbridge_core::config::AppConfig;
use foodbridge_realtime::{ConnectionRegistry, EventBus};
use foodbridge_service::ListingService;
use foodbridge_store::{ListingStore, MemoryStore};

/// Test application context.
///
/// Runs the full router over an in-memory document store, so tests need
/// no external services.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Connection registry, for observing published events.
    pub registry: Arc<ConnectionRegistry>,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = Arc::new(AppConfig::default());
        let registry = Arc::new(ConnectionRegistry::new(
            config.realtime.channel_buffer_size,
        ));
        let bus = Arc::new(EventBus::new(registry.clone()));
        let store = Arc::new(ListingStore::new(Arc::new(MemoryStore::new())));
        let listing_service = Arc::new(ListingService::new(
            store,
            bus,
            config.realtime.lifecycle_notifications,
        ));

        let state = AppState {
            config,
            registry: registry.clone(),
            listing_service,
        };

        Self {
            router: build_router(state),
            registry,
        }
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (Null if unparseable).
    pub body: Value,
}
