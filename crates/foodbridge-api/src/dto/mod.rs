//! Request and response data transfer objects.

pub mod request;

pub use request::{ListingQuery, PostListingRequest, TransitionRequest};
