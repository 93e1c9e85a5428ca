//! Single-file JSON document store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use foodbridge_core::{AppError, AppResult};

use super::DocumentStore;

type Collections = HashMap<String, HashMap<String, Value>>;

/// Document store backed by one JSON file on disk.
///
/// The full database is mirrored in memory behind a `RwLock`; every write
/// rewrites the file. Writes go through a temp file and rename so a torn
/// write never corrupts the live file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<Collections>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing contents if present.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::with_source(
                    foodbridge_core::error::ErrorKind::Store,
                    format!("Corrupt database file {}: {e}", path.display()),
                    e,
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Collections::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    foodbridge_core::error::ErrorKind::Store,
                    format!("Failed to read database file {}: {e}", path.display()),
                    e,
                ));
            }
        };

        info!(path = %path.display(), "Document store opened");

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    async fn flush(&self, data: &Collections) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get(&self, collection: &str, key: &str) -> AppResult<Option<Value>> {
        let data = self.data.read().await;
        Ok(data
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn put(&self, collection: &str, key: &str, document: Value) -> AppResult<()> {
        // The write lock is held across the flush so the file on disk
        // always reflects a complete put. A failed flush rolls the
        // in-memory mirror back, so reads never serve a document the
        // caller was told did not persist.
        let mut data = self.data.write().await;
        let previous = data
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), document);
        if let Err(err) = self.flush(&data).await {
            if let Some(docs) = data.get_mut(collection) {
                match previous {
                    Some(prev) => {
                        docs.insert(key.to_string(), prev);
                    }
                    None => {
                        docs.remove(key);
                    }
                }
            }
            return Err(err);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> AppResult<Vec<Value>> {
        let data = self.data.read().await;
        Ok(data
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }
}
