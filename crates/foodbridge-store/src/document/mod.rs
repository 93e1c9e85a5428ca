//! Document store abstraction.
//!
//! The external document database is modeled as keyed JSON documents
//! grouped into named collections. Only the read/write primitives and
//! their durability contract matter here: a successful `put` has been
//! persisted before it returns.

pub mod json_file;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use foodbridge_core::AppResult;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Trait for document database backends.
///
/// Implementations exist for a single JSON file on disk and for an
/// in-memory map used by tests. Failures surface as
/// [`ErrorKind::Store`](foodbridge_core::error::ErrorKind::Store).
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the document stored under `key` in `collection`.
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Value>>;

    /// Durably write `document` under `key` in `collection`,
    /// replacing any existing document.
    async fn put(&self, collection: &str, key: &str, document: Value) -> AppResult<()>;

    /// Read all documents in `collection`, in no particular order.
    async fn list(&self, collection: &str) -> AppResult<Vec<Value>>;
}
