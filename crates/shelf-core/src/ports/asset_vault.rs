use std::collections::HashSet;

use async_trait::async_trait;

use super::MaterializationError;

/// Owner of the private directory holding materialized image files.
///
/// A file is vault-owned from the moment `materialize` returns it until the
/// single matching `release`. No other component writes into the directory.
#[async_trait]
pub trait AssetVaultPort: Send + Sync {
    /// Copy the bytes behind `locator` into a new vault file and return its
    /// local locator. No partial file is left behind on failure.
    async fn materialize(&self, locator: &str) -> Result<String, MaterializationError>;

    /// Delete a vault file. Locators outside the vault, or already gone, are
    /// ignored; failures are logged and never reach the caller.
    async fn release(&self, locator: &str);

    /// Whether `locator` names a file inside the vault directory.
    fn owns(&self, locator: &str) -> bool;

    /// Delete every vault file not named in `keep`, returning how many were
    /// removed. Only meant to run before the store is shared.
    async fn prune(&self, keep: &HashSet<String>) -> usize;
}
