//! Listing lifecycle service.

pub mod service;

pub use service::{ListingService, PostListing};
