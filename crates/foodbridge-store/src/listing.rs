//! Listing repository with per-id atomic read-modify-write.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use foodbridge_core::types::ListingId;
use foodbridge_core::{AppError, AppResult};
use foodbridge_entity::{Listing, ListingStatus};

use crate::document::DocumentStore;

const COLLECTION: &str = "listings";

/// Authoritative collection of listing records.
///
/// Sole writer of listings. The key guarantee is `update`: the mutator is
/// applied as a single atomic read-modify-write per listing id, so two
/// concurrent accept attempts on the same listing cannot both observe it
/// as available. Mutations to different ids proceed concurrently.
#[derive(Debug)]
pub struct ListingStore {
    docs: Arc<dyn DocumentStore>,
    /// Per-listing write lock, held from document read through document write.
    locks: DashMap<ListingId, Arc<Mutex<()>>>,
}

impl ListingStore {
    /// Create a listing store over the given document backend.
    pub fn new(docs: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs,
            locks: DashMap::new(),
        }
    }

    /// Persist a freshly created listing and return it.
    pub async fn create(&self, listing: Listing) -> AppResult<Listing> {
        self.docs
            .put(
                COLLECTION,
                &listing.id.to_string(),
                serde_json::to_value(&listing)?,
            )
            .await?;
        debug!(listing_id = %listing.id, "Listing created");
        Ok(listing)
    }

    /// Fetch a listing by id.
    pub async fn get(&self, id: ListingId) -> AppResult<Listing> {
        let doc = self
            .docs
            .get(COLLECTION, &id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))?;
        Ok(serde_json::from_value(doc)?)
    }

    /// List all listings, newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<ListingStatus>) -> AppResult<Vec<Listing>> {
        let docs = self.docs.list(COLLECTION).await?;
        let mut listings = docs
            .into_iter()
            .map(serde_json::from_value::<Listing>)
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(status) = status {
            listings.retain(|l| l.status == status);
        }
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    /// Apply `mutate` to the listing as one atomic read-modify-write.
    ///
    /// No other `update` for the same id can interleave between the read
    /// and the write. If the mutator fails, nothing is persisted and the
    /// record is left unchanged.
    pub async fn update<F>(&self, id: ListingId, mutate: F) -> AppResult<Listing>
    where
        F: FnOnce(&mut Listing) -> AppResult<()>,
    {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock().await;

        let result = async {
            let mut listing = self.get(id).await?;
            mutate(&mut listing)?;

            self.docs
                .put(COLLECTION, &id.to_string(), serde_json::to_value(&listing)?)
                .await?;
            debug!(listing_id = %id, status = %listing.status, "Listing updated");
            Ok(listing)
        }
        .await;

        drop(guard);
        // Drop the lock entry once no other update holds or awaits it, so
        // the map stays proportional to in-flight updates. strong count 2
        // means only the map and this call still reference the lock.
        self.locks
            .remove_if(&id, |_, entry| Arc::strong_count(entry) == 2);
        result
    }
}
