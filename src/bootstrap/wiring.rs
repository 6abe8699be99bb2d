//! Builds the process-wide shelf from configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use shelf_app::{CaptureClipboard, ClipboardStore};
use shelf_core::ports::ClockPort;
use shelf_core::ShelfConfig;
use shelf_infra::fs::app_data_dir::app_data_dir;
use shelf_infra::{
    FileRecordStore, FsAssetVault, RecordShelfRepository, SchemeAssetSource, SystemClock,
};
use tracing::info;

/// Everything the CLI talks to, wired once at startup.
pub struct ShelfRuntime {
    pub store: Arc<ClipboardStore>,
    pub capture: CaptureClipboard,
}

/// `data_dir` from the config, or the platform data directory when unset.
pub fn resolve_data_dir(config: &ShelfConfig) -> anyhow::Result<PathBuf> {
    if config.data_dir.as_os_str().is_empty() {
        app_data_dir()
    } else {
        Ok(config.data_dir.clone())
    }
}

impl ShelfRuntime {
    pub async fn build(config: ShelfConfig) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(&config)?;
        let config = config.with_data_dir(data_dir);
        info!(data_dir = %config.data_dir.display(), "Opening shelf");

        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let vault = FsAssetVault::open(
            config.image_dir_path(),
            Arc::new(SchemeAssetSource::default()),
            clock.clone(),
        )
        .await
        .context("Failed to open asset vault")?;
        let repo = RecordShelfRepository::new(
            Arc::new(FileRecordStore::new(&config.data_dir)),
            config.record_key.clone(),
        );

        let store = Arc::new(
            ClipboardStore::open(
                Arc::new(vault),
                Arc::new(repo),
                clock.clone(),
                config.retention(),
            )
            .await,
        );
        let capture = CaptureClipboard::new(store.clone(), clock).await;

        Ok(Self { store, capture })
    }
}
