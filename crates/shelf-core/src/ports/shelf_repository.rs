use async_trait::async_trait;

use super::PersistenceError;
use crate::item::ShelfItem;

/// Loads and saves the whole ordered item sequence as one record.
#[async_trait]
pub trait ShelfRepositoryPort: Send + Sync {
    /// Load the persisted sequence. Malformed entries are dropped; an absent
    /// record yields an empty sequence.
    async fn load(&self) -> Result<Vec<ShelfItem>, PersistenceError>;

    async fn save(&self, items: &[ShelfItem]) -> Result<(), PersistenceError>;
}
