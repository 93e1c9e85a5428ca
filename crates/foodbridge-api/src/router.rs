//! Route definitions for the Foodbridge HTTP API.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state);

    Router::new()
        .route(
            "/listings",
            post(handlers::listing::post_listing).get(handlers::listing::list_listings),
        )
        .route("/listings/{id}", get(handlers::listing::get_listing))
        .route(
            "/listings/{id}/accept",
            post(handlers::listing::accept_listing),
        )
        .route(
            "/listings/{id}/mark-picked",
            post(handlers::listing::mark_picked),
        )
        .route(
            "/listings/{id}/mark-delivered",
            post(handlers::listing::mark_delivered),
        )
        .route("/ws", get(handlers::ws::ws_upgrade))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors.allowed_origins;
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
