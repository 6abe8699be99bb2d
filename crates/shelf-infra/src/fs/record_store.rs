//! File-per-key record store.
//!
//! Each key is stored as `<root>/<key>.json`. Writes go to `<key>.json.tmp`,
//! are synced, then renamed over the target, so readers see either the old or
//! the new record.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use shelf_core::ports::{PersistenceError, RecordStorePort};
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub struct FileRecordStore {
    root: PathBuf,
}

impl FileRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    async fn atomic_write(&self, path: &PathBuf, value: &[u8]) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(err) = fs::rename(&tmp_path, path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStorePort for FileRecordStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Read(format!("{}: {}", path.display(), e))),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        self.atomic_write(&path, value)
            .await
            .map_err(|e| PersistenceError::Write(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp.path().join("records"));

        assert_eq!(store.get("items").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_round_trip_and_overwrite() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp.path().join("records"));

        store.put("items", b"[1]").await.unwrap();
        store.put("items", b"[1,2]").await.unwrap();

        assert_eq!(store.get("items").await.unwrap().as_deref(), Some(&b"[1,2]"[..]));
        let tmp = temp.path().join("records").join("items.json.tmp");
        assert!(!tmp.exists(), "tmp file should be removed after rename");
    }

    #[tokio::test]
    async fn rejects_keys_that_could_escape_root() {
        let temp = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp.path());

        for key in ["", "../items", "a/b", "items.json"] {
            let err = store.put(key, b"[]").await.expect_err("invalid key");
            assert!(matches!(err, PersistenceError::InvalidKey(_)));
        }
    }

    #[tokio::test]
    async fn write_failure_is_reported_as_write_error() {
        let temp = TempDir::new().unwrap();
        // A regular file where the root directory should be.
        let root = temp.path().join("not-a-dir");
        std::fs::write(&root, b"").unwrap();
        let store = FileRecordStore::new(&root);

        let err = store.put("items", b"[]").await.expect_err("root is a file");

        assert!(matches!(err, PersistenceError::Write(_)));
    }
}
