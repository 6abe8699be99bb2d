//! Locator helpers.
//!
//! A locator is an opaque string naming a data source. Only the `file://` form is
//! interpreted here; everything else is handed to an asset source as-is.

use std::path::{Path, PathBuf};

pub const FILE_SCHEME: &str = "file://";

/// Wrap a local path as a `file://` locator.
pub fn file_locator(path: &Path) -> String {
    format!("{}{}", FILE_SCHEME, path.display())
}

/// Local path behind a `file://` locator, `None` for any other scheme.
pub fn local_path(locator: &str) -> Option<PathBuf> {
    locator
        .strip_prefix(FILE_SCHEME)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Scheme of a locator (`"file"`, `"https"`, `"content"`, ...), if it has one.
pub fn scheme(locator: &str) -> Option<&str> {
    let (scheme, _) = locator.split_once("://")?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_locator_round_trips_absolute_path() {
        let path = Path::new("/data/shelf/clipboard_images/img_1.png");
        let locator = file_locator(path);

        assert_eq!(locator, "file:///data/shelf/clipboard_images/img_1.png");
        assert_eq!(local_path(&locator).as_deref(), Some(path));
    }

    #[test]
    fn local_path_ignores_other_schemes() {
        assert_eq!(local_path("content://media/external/images/1"), None);
        assert_eq!(local_path("file://"), None);
        assert_eq!(local_path("/plain/path"), None);
    }

    #[test]
    fn scheme_extraction() {
        assert_eq!(scheme("https://example.com/a.png"), Some("https"));
        assert_eq!(scheme("content://media/1"), Some("content"));
        assert_eq!(scheme("/tmp/a.png"), None);
        assert_eq!(scheme("not a scheme://x"), None);
    }
}
