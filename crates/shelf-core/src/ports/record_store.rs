use async_trait::async_trait;

use super::PersistenceError;

/// Durable key-value blob store.
///
/// `put` must be all-or-nothing: after a failed or interrupted write a reader
/// sees either the previous value or nothing, never a torn record.
#[async_trait]
pub trait RecordStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError>;
}
