//! In-memory document store for tests and ephemeral deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use foodbridge_core::AppResult;

use super::DocumentStore;

/// Document store holding everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Value>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(key).cloned()))
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> AppResult<()> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        Ok(())
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Value>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
