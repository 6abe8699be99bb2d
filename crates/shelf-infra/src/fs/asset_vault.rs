//! Filesystem-backed asset vault.
//!
//! Materialized images live as flat files in one private directory:
//! `<dir>/img_<millis>_<token>.<ext>`. A copy is first written to a hidden
//! staging file (`.<millis>_<token>.part`) and only renamed into place once the
//! whole stream has been flushed, so a failed copy never leaves a file that
//! looks like a finished asset.

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::locator::{file_locator, local_path};
use shelf_core::ports::{
    AssetSourcePort, AssetStream, AssetVaultPort, ClockPort, MaterializationError,
};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

const FILE_PREFIX: &str = "img_";
const STAGING_SUFFIX: &str = ".part";
const SNIFF_LEN: usize = 32;
const FALLBACK_EXTENSION: &str = "bin";

pub struct FsAssetVault {
    dir: PathBuf,
    source: Arc<dyn AssetSourcePort>,
    clock: Arc<dyn ClockPort>,
}

impl FsAssetVault {
    /// Open (and create if needed) the vault directory.
    ///
    /// The directory is canonicalized so ownership checks compare resolved paths.
    pub async fn open(
        dir: impl Into<PathBuf>,
        source: Arc<dyn AssetSourcePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Result<Self, MaterializationError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(MaterializationError::VaultUnavailable)?;
        let dir = fs::canonicalize(&dir)
            .await
            .map_err(MaterializationError::VaultUnavailable)?;

        info!(dir = %dir.display(), "Asset vault opened");
        Ok(Self { dir, source, clock })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path behind `locator` when it names a direct child of the vault directory.
    ///
    /// Purely lexical: `.` and `..` components are rejected outright.
    fn owned_path(&self, locator: &str) -> Option<PathBuf> {
        let path = local_path(locator)?;
        let plain = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::RootDir | Component::Prefix(_)));
        (plain && path.parent() == Some(self.dir.as_path())).then_some(path)
    }

    fn next_token(&self) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        format!("{}_{}", self.clock.now_ms(), &nonce[..8])
    }

    #[tracing::instrument(name = "infra.asset_vault.materialize", skip(self), fields(locator = %locator))]
    async fn copy_into_vault(&self, locator: &str) -> Result<String, MaterializationError> {
        let mut reader = self.source.open(locator).await?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(MaterializationError::VaultUnavailable)?;

        let token = self.next_token();
        let staging = self.dir.join(format!(".{token}{STAGING_SUFFIX}"));

        let result = match write_staging(&mut reader, &staging).await {
            Ok(extension) => {
                let target = self.dir.join(format!("{FILE_PREFIX}{token}.{extension}"));
                fs::rename(&staging, &target).await.map(|_| target)
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(target) => {
                debug!(path = %target.display(), "Materialized asset");
                Ok(file_locator(&target))
            }
            Err(source) => {
                discard_staging(&staging).await;
                Err(MaterializationError::CopyInterrupted {
                    locator: locator.to_string(),
                    source,
                })
            }
        }
    }
}

async fn write_staging(reader: &mut AssetStream, staging: &Path) -> io::Result<&'static str> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(staging)
        .await?;

    let mut head = vec![0u8; SNIFF_LEN];
    let filled = read_head(reader, &mut head).await?;
    head.truncate(filled);

    file.write_all(&head).await?;
    tokio::io::copy(reader, &mut file).await?;
    file.sync_all().await?;

    Ok(sniff_extension(&head))
}

/// Fill `buf` as far as the stream allows; short only at end of stream.
async fn read_head(reader: &mut AssetStream, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

fn sniff_extension(head: &[u8]) -> &'static str {
    image::guess_format(head)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or(FALLBACK_EXTENSION)
}

async fn discard_staging(staging: &Path) {
    if let Err(err) = fs::remove_file(staging).await {
        if err.kind() != io::ErrorKind::NotFound {
            warn!(path = %staging.display(), error = %err, "Failed to remove staging file");
        }
    }
}

#[async_trait]
impl AssetVaultPort for FsAssetVault {
    async fn materialize(&self, locator: &str) -> Result<String, MaterializationError> {
        self.copy_into_vault(locator).await
    }

    async fn release(&self, locator: &str) {
        let Some(path) = self.owned_path(locator) else {
            debug!(locator = %locator, "Not a vault file, skipping release");
            return;
        };

        match fs::canonicalize(&path).await {
            Ok(resolved) if resolved.parent() == Some(self.dir.as_path()) => {}
            Ok(resolved) => {
                warn!(
                    locator = %locator,
                    resolved = %resolved.display(),
                    "Vault entry resolves outside the vault, not deleting"
                );
                return;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(locator = %locator, "Vault file already gone");
                return;
            }
            Err(err) => {
                warn!(locator = %locator, error = %err, "Failed to resolve vault file");
                return;
            }
        }

        match fs::remove_file(&path).await {
            Ok(()) => debug!(locator = %locator, "Released vault file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(locator = %locator, "Vault file already gone");
            }
            Err(err) => warn!(locator = %locator, error = %err, "Failed to delete vault file"),
        }
    }

    fn owns(&self, locator: &str) -> bool {
        self.owned_path(locator).is_some()
    }

    async fn prune(&self, keep: &HashSet<String>) -> usize {
        let keep: HashSet<PathBuf> = keep.iter().filter_map(|l| self.owned_path(l)).collect();

        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %self.dir.display(), error = %err, "Failed to scan asset vault");
                return 0;
            }
        };

        let mut removed = 0usize;
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    warn!(error = %err, "Failed to read asset vault entry");
                    break;
                }
            };

            let path = entry.path();
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if !is_file || keep.contains(&path) {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Failed to prune orphaned asset")
                }
            }
        }

        if removed > 0 {
            info!(removed, "Pruned orphaned vault files");
        }
        removed
    }
}
