use async_trait::async_trait;
use shelf_core::locator::scheme;
use shelf_core::ports::{AssetSourcePort, AssetStream, MaterializationError};

use super::{HttpAssetSource, LocalFileSource};

/// Routes a locator to the source that understands its scheme.
///
/// - no scheme / `file` → [`LocalFileSource`]
/// - `http` / `https` → [`HttpAssetSource`]
/// - anything else (e.g. `content://`) → `UnsupportedLocator`
#[derive(Debug, Clone, Default)]
pub struct SchemeAssetSource {
    local: LocalFileSource,
    http: HttpAssetSource,
}

impl SchemeAssetSource {
    pub fn new(http: HttpAssetSource) -> Self {
        Self {
            local: LocalFileSource,
            http,
        }
    }
}

#[async_trait]
impl AssetSourcePort for SchemeAssetSource {
    async fn open(&self, locator: &str) -> Result<AssetStream, MaterializationError> {
        match scheme(locator).map(str::to_ascii_lowercase).as_deref() {
            None | Some("file") => self.local.open(locator).await,
            Some("http") | Some("https") => self.http.open(locator).await,
            Some(_) => Err(MaterializationError::UnsupportedLocator(locator.to_string())),
        }
    }
}
