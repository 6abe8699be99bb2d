use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shelf_core::locator::local_path;
use shelf_core::ports::{AssetSourcePort, AssetStream, MaterializationError};
use tokio::fs::File;

/// Reads `file://` locators and plain absolute paths from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSource;

impl LocalFileSource {
    fn resolve(locator: &str) -> Option<PathBuf> {
        local_path(locator).or_else(|| {
            let path = Path::new(locator);
            path.is_absolute().then(|| path.to_path_buf())
        })
    }
}

#[async_trait]
impl AssetSourcePort for LocalFileSource {
    async fn open(&self, locator: &str) -> Result<AssetStream, MaterializationError> {
        let path = Self::resolve(locator)
            .ok_or_else(|| MaterializationError::UnsupportedLocator(locator.to_string()))?;

        let file = File::open(&path)
            .await
            .map_err(|e| MaterializationError::SourceUnavailable {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::locator::file_locator;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    async fn read_all(mut stream: AssetStream) -> Vec<u8> {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        buf
    }

    #[tokio::test]
    async fn opens_file_locator_and_absolute_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.png");
        std::fs::write(&path, b"bytes").unwrap();

        let by_locator = LocalFileSource.open(&file_locator(&path)).await.unwrap();
        let by_path = LocalFileSource
            .open(path.to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(read_all(by_locator).await, b"bytes");
        assert_eq!(read_all(by_path).await, b"bytes");
    }

    #[tokio::test]
    async fn rejects_relative_and_foreign_locators() {
        for locator in ["relative/a.png", "content://media/1"] {
            let err = LocalFileSource.open(locator).await.err().unwrap();
            assert!(matches!(err, MaterializationError::UnsupportedLocator(_)));
        }
    }
}
