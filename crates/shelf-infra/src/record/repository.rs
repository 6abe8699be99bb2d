use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::ports::{PersistenceError, RecordStorePort, ShelfRepositoryPort};
use shelf_core::ShelfItem;
use tracing::{debug, warn};

use super::codec;

/// Stores the shelf as a single JSON record under one key.
pub struct RecordShelfRepository {
    store: Arc<dyn RecordStorePort>,
    key: String,
}

impl RecordShelfRepository {
    pub fn new(store: Arc<dyn RecordStorePort>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl ShelfRepositoryPort for RecordShelfRepository {
    async fn load(&self) -> Result<Vec<ShelfItem>, PersistenceError> {
        let Some(bytes) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "No persisted shelf record");
            return Ok(Vec::new());
        };

        let decoded = codec::decode(&bytes)?;
        for err in &decoded.dropped {
            warn!(key = %self.key, error = %err, "Dropping malformed shelf entry");
        }
        debug!(key = %self.key, count = decoded.items.len(), "Loaded shelf record");
        Ok(decoded.items)
    }

    async fn save(&self, items: &[ShelfItem]) -> Result<(), PersistenceError> {
        let bytes = codec::encode(items)?;
        self.store.put(&self.key, &bytes).await
    }
}
