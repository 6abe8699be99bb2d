use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "SideShelf";

/// Get the SideShelf application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/SideShelf
/// - Windows: %APPDATA%\SideShelf
/// - Linux: $XDG_DATA_HOME/SideShelf or ~/.local/share/SideShelf
///
/// This function does not create the directory; callers decide when to.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_data_dir_returns_path() {
        let path = app_data_dir().expect("Should be able to get app data dir");
        assert!(path.ends_with("SideShelf"));
    }
}
