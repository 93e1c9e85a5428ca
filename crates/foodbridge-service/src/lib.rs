//! # foodbridge-service
//!
//! Business logic for Foodbridge. [`listing::ListingService`] enforces the
//! listing lifecycle state machine and publishes real-time events after
//! successful transitions.

pub mod listing;

pub use listing::{ListingService, PostListing};
