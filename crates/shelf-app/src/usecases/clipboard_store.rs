use std::collections::HashSet;
use std::sync::Arc;

use shelf_core::item::find_same_capture;
use shelf_core::ports::{AssetVaultPort, ClockPort, PersistenceError, ShelfRepositoryPort};
use shelf_core::retention::Retained;
use shelf_core::{CaptureKey, ItemId, RetentionPolicy, ShelfItem};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The new state could not be persisted; the in-memory shelf is unchanged.
    #[error("failed to persist shelf: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Single source of truth for the clipboard history.
///
/// Every mutation runs as one load-mutate-persist transition under the items
/// lock. The in-memory sequence is only replaced after the new sequence has been
/// saved, so a failed persist leaves the previous state in place.
pub struct ClipboardStore {
    items: Mutex<Vec<ShelfItem>>,
    vault: Arc<dyn AssetVaultPort>,
    repo: Arc<dyn ShelfRepositoryPort>,
    clock: Arc<dyn ClockPort>,
    policy: RetentionPolicy,
}

impl ClipboardStore {
    /// Hydrate the store from the repository.
    ///
    /// An unreadable record yields an empty shelf. Items that aged out or exceed
    /// capacity while the process was down are evicted before the store is
    /// returned, and vault files no surviving item references are swept.
    #[tracing::instrument(name = "usecase.clipboard_store.open", skip_all)]
    pub async fn open(
        vault: Arc<dyn AssetVaultPort>,
        repo: Arc<dyn ShelfRepositoryPort>,
        clock: Arc<dyn ClockPort>,
        policy: RetentionPolicy,
    ) -> Self {
        let store = Self {
            items: Mutex::new(Vec::new()),
            vault,
            repo,
            clock,
            policy,
        };

        let loaded = match store.repo.load().await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "Failed to load shelf, starting empty");
                return store;
            }
        };

        let Retained { kept, evicted } = store.policy.apply(loaded, store.clock.now_ms());
        let mut keep: HashSet<String> = locators_of(&kept);

        if !evicted.is_empty() {
            match store.repo.save(&kept).await {
                Ok(()) => {
                    info!(evicted = evicted.len(), "Evicted stale items on open");
                    store.release_unreferenced(evicted, &kept).await;
                }
                Err(err) => {
                    // The record still names these items; leave their files alone.
                    warn!(error = %err, "Failed to persist eviction on open");
                    keep.extend(locators_of(&evicted));
                }
            }
        }

        store.vault.prune(&keep).await;

        info!(count = kept.len(), "Clipboard store opened");
        *store.items.lock().await = kept;
        store
    }

    /// Insert `candidate` at the front, replacing any item holding the same
    /// content.
    ///
    /// Images whose locator is not vault-owned are materialized first; a failed
    /// copy keeps the original locator. Only a persistence failure fails the
    /// call.
    #[tracing::instrument(
        name = "usecase.clipboard_store.add",
        skip(self, candidate),
        fields(item_id = %candidate.id(), kind = candidate.kind_str())
    )]
    pub async fn add(&self, candidate: ShelfItem) -> Result<(), StoreError> {
        let requested = candidate.clone();
        let (candidate, inherited) = {
            let items = self.items.lock().await;
            match find_same_capture(&items, &candidate) {
                Some(pos) => {
                    let inherited = items[pos]
                        .asset_locator()
                        .filter(|l| self.vault.owns(l))
                        .map(str::to_string);
                    (inherit_assets(&items[pos], candidate), inherited)
                }
                None => (candidate, None),
            }
        };

        // The copy only touches the new item, so it runs without the lock.
        let (mut candidate, mut fresh) = self.materialize_if_needed(candidate).await;

        let mut items = self.items.lock().await;

        // Between the two locks the item we inherited from may have been
        // removed or evicted, and its file released.
        if let Some(inherited) = inherited.as_deref() {
            let still_owned = items
                .iter()
                .any(|item| item.asset_locator() == Some(inherited));
            if !still_owned && candidate.asset_locator() == Some(inherited) {
                if requested.asset_locator() == Some(inherited) {
                    warn!(
                        locator = %inherited,
                        "Captured vault file was released, dropping capture"
                    );
                    return Ok(());
                }
                debug!(locator = %inherited, "Inherited vault file was released, copying again");
                (candidate, fresh) = self.materialize_if_needed(requested).await;
            }
        }

        let mut next = items.clone();
        let mut displaced = Vec::new();

        if let Some(pos) = find_same_capture(&next, &candidate) {
            let existing = next.remove(pos);
            if let Some(owned) = existing.asset_locator().filter(|l| self.vault.owns(l)) {
                if fresh.as_deref() != Some(owned) {
                    // Stored concurrently while we were copying; keep theirs.
                    candidate = inherit_assets(&existing, candidate);
                    if let Some(ours) = fresh.take() {
                        debug!(locator = %ours, "Dropping duplicate materialized copy");
                        self.vault.release(&ours).await;
                    }
                }
            }
            displaced.push(existing);
        }

        next.insert(0, candidate);
        let Retained { kept, evicted } = self.policy.apply(next, self.clock.now_ms());
        displaced.extend(evicted);

        if let Err(err) = self.repo.save(&kept).await {
            warn!(error = %err, "Failed to persist added item, rolling back");
            if let Some(ours) = fresh {
                self.vault.release(&ours).await;
            }
            return Err(err.into());
        }

        *items = kept;
        self.release_unreferenced(displaced, &items).await;
        Ok(())
    }

    /// Remove the item with `id`. Returns `false` when no such item exists.
    #[tracing::instrument(name = "usecase.clipboard_store.remove", skip(self), fields(item_id = %id))]
    pub async fn remove(&self, id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.items.lock().await;
        let Some(pos) = items.iter().position(|item| item.id() == id) else {
            debug!("No item to remove");
            return Ok(false);
        };

        let mut next = items.clone();
        let removed = next.remove(pos);
        self.repo.save(&next).await?;

        *items = next;
        self.release_unreferenced(vec![removed], &items).await;
        info!("Removed item");
        Ok(true)
    }

    /// Snapshot of the shelf, newest first.
    pub async fn list(&self) -> Vec<ShelfItem> {
        self.items.lock().await.clone()
    }

    /// Whether the newest item already holds the content behind `key`.
    pub async fn is_duplicate_of_most_recent(&self, key: &CaptureKey) -> bool {
        self.items
            .lock()
            .await
            .first()
            .is_some_and(|item| key.matches(item))
    }

    /// Evict every expired item. Returns how many were removed.
    #[tracing::instrument(name = "usecase.clipboard_store.cleanup_expired", skip(self))]
    pub async fn cleanup_expired(&self) -> Result<usize, StoreError> {
        let mut items = self.items.lock().await;
        let Retained { kept, evicted } = self.policy.expire(items.clone(), self.clock.now_ms());
        if evicted.is_empty() {
            return Ok(0);
        }

        self.repo.save(&kept).await?;

        let removed = evicted.len();
        *items = kept;
        self.release_unreferenced(evicted, &items).await;
        info!(removed, "Expired items cleaned up");
        Ok(removed)
    }

    /// Remove every item and release every vault file. Returns how many items
    /// were removed.
    #[tracing::instrument(name = "usecase.clipboard_store.clear_all", skip(self))]
    pub async fn clear_all(&self) -> Result<usize, StoreError> {
        let mut items = self.items.lock().await;
        if items.is_empty() {
            return Ok(0);
        }

        self.repo.save(&[]).await?;

        let removed = std::mem::take(&mut *items);
        let count = removed.len();
        self.release_unreferenced(removed, &[]).await;
        info!(removed = count, "Shelf cleared");
        Ok(count)
    }

    /// Largest id currently on the shelf.
    pub async fn max_id(&self) -> Option<ItemId> {
        self.items.lock().await.iter().map(ShelfItem::id).max()
    }

    async fn materialize_if_needed(&self, candidate: ShelfItem) -> (ShelfItem, Option<String>) {
        match candidate {
            ShelfItem::Image(mut image) if !self.vault.owns(&image.local_uri) => {
                let locator = image.local_uri.clone();
                match self.vault.materialize(&locator).await {
                    Ok(owned) => {
                        image.local_uri = owned.clone();
                        image.source_uri = Some(locator);
                        (ShelfItem::Image(image), Some(owned))
                    }
                    Err(err) => {
                        warn!(
                            locator = %locator,
                            error = %err,
                            "Image materialization failed, keeping original locator"
                        );
                        image.source_uri = None;
                        (ShelfItem::Image(image), None)
                    }
                }
            }
            other => (other, None),
        }
    }

    /// Release the vault files of `removed` items that no `live` item still
    /// points at.
    async fn release_unreferenced(&self, removed: Vec<ShelfItem>, live: &[ShelfItem]) {
        let live: HashSet<&str> = live.iter().filter_map(ShelfItem::asset_locator).collect();
        for item in &removed {
            let Some(locator) = item.asset_locator() else {
                continue;
            };
            if !live.contains(locator) && self.vault.owns(locator) {
                self.vault.release(locator).await;
            }
        }
    }
}

/// Carry the stored assets of `existing` over to `candidate`, so a repeated
/// image is not copied again.
fn inherit_assets(existing: &ShelfItem, candidate: ShelfItem) -> ShelfItem {
    match (existing, candidate) {
        (ShelfItem::Image(existing), ShelfItem::Image(mut image)) => {
            image.local_uri = existing.local_uri.clone();
            image.source_uri = existing.source_uri.clone();
            ShelfItem::Image(image)
        }
        (_, candidate) => candidate,
    }
}

fn locators_of(items: &[ShelfItem]) -> HashSet<String> {
    items
        .iter()
        .filter_map(ShelfItem::asset_locator)
        .map(str::to_string)
        .collect()
}
