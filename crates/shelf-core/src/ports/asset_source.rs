use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::MaterializationError;

pub type AssetStream = Box<dyn AsyncRead + Send + Unpin>;

/// Byte-stream capability: opens a readable stream behind a locator that lives
/// outside this system's control.
#[async_trait]
pub trait AssetSourcePort: Send + Sync {
    async fn open(&self, locator: &str) -> Result<AssetStream, MaterializationError>;
}
