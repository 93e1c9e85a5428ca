//! Donation listing entity.

pub mod model;
pub mod status;

pub use model::{Listing, NewListing};
pub use status::ListingStatus;
