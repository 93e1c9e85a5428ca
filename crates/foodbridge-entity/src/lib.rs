//! # foodbridge-entity
//!
//! Domain entities for Foodbridge. The central entity is the donation
//! [`Listing`](listing::Listing) and its forward-only lifecycle status.

pub mod listing;

pub use listing::{Listing, ListingStatus, NewListing};
