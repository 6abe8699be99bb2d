use std::collections::HashMap;

use async_trait::async_trait;
use shelf_core::ports::{PersistenceError, RecordStorePort};
use tokio::sync::Mutex;

/// Record store that lives only as long as the process.
///
/// Used when no data directory is available and in tests.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStorePort for InMemoryRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError> {
        self.records
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
