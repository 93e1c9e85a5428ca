//! # foodbridge-api
//!
//! HTTP surface for Foodbridge: the Axum router, request DTOs, handlers,
//! error-to-response mapping, and the WebSocket upgrade for the
//! real-time channel.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
