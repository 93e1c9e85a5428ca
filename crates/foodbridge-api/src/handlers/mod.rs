//! HTTP request handlers.

pub mod health;
pub mod listing;
pub mod ws;
