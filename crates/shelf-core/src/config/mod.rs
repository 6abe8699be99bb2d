//! Shelf configuration DTO.
//!
//! Maps the TOML configuration onto plain data. Missing keys fall back to the
//! shelf defaults; an empty `data_dir` means "use the platform data directory"
//! and is resolved by the caller.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::retention::{RetentionPolicy, MAX_ITEMS, TTL};

pub const DEFAULT_RECORD_KEY: &str = "items";
pub const DEFAULT_IMAGE_DIR: &str = "clipboard_images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Root directory for the record store and the asset vault.
    pub data_dir: PathBuf,

    /// Logical key the item sequence is stored under.
    pub record_key: String,

    /// Name of the vault directory below `data_dir`.
    pub image_dir: String,

    pub max_items: usize,
    pub ttl: Duration,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            record_key: DEFAULT_RECORD_KEY.to_string(),
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            max_items: MAX_ITEMS,
            ttl: TTL,
        }
    }
}

/// The vault prunes every unreferenced file in its directory, so it must be a
/// single child of `data_dir`: no `.`/`..`, no separators, not absolute.
fn is_plain_dir_name(dir: &str) -> bool {
    let mut components = Path::new(dir).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !dir.trim().is_empty()
}

impl ShelfConfig {
    /// Create ShelfConfig from TOML value
    pub fn from_toml(toml_value: &toml::Value) -> Self {
        let defaults = Self::default();
        let storage = toml_value.get("storage");
        let retention = toml_value.get("retention");

        let str_in = |section: Option<&toml::Value>, key: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let uint_in = |section: Option<&toml::Value>, key: &str| {
            section
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .and_then(|v| u64::try_from(v).ok())
        };

        Self {
            data_dir: str_in(storage, "data_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            record_key: str_in(storage, "record_key").unwrap_or(defaults.record_key),
            image_dir: str_in(storage, "image_dir")
                .filter(|dir| is_plain_dir_name(dir))
                .unwrap_or(defaults.image_dir),
            max_items: uint_in(retention, "max_items")
                .and_then(|v| usize::try_from(v).ok())
                .unwrap_or(defaults.max_items),
            ttl: uint_in(retention, "ttl_secs")
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
        }
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.max_items, self.ttl)
    }

    pub fn image_dir_path(&self) -> PathBuf {
        self.data_dir.join(&self.image_dir)
    }
}
