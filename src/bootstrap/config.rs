//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and maps it onto [`ShelfConfig`]. Defaults for missing
//! keys live in the DTO, not here.

use std::path::Path;

use anyhow::Context;
use shelf_core::ShelfConfig;

/// Load configuration from a TOML file.
///
/// A missing file is not an error: the shelf runs on defaults until the user
/// writes one.
///
/// # Errors / 错误
///
/// - The file exists but cannot be read
/// - The content is not valid TOML
pub fn load_config(config_path: &Path) -> anyhow::Result<ShelfConfig> {
    if !config_path.exists() {
        return Ok(ShelfConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(ShelfConfig::from_toml(&toml_value))
}
