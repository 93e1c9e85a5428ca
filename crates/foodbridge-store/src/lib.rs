//! # foodbridge-store
//!
//! Persistence layer for Foodbridge. The [`document::DocumentStore`] trait
//! abstracts the external document database behind read/write primitives;
//! [`listing::ListingStore`] builds the authoritative listing collection on
//! top of it, serializing concurrent mutations per listing id.

pub mod document;
pub mod listing;

pub use document::{DocumentStore, JsonFileStore, MemoryStore};
pub use listing::ListingStore;
