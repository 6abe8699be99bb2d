use super::matching::image_matches_locator;
use super::ShelfItem;

/// Kind of content reported by the clipboard notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    Text,
    Image,
}

/// Lightweight identity of a clipboard observation, used by the notifier to ask
/// whether the newest item already represents it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaptureKey {
    Text(String),
    Image(String),
}

impl CaptureKey {
    pub fn new(kind: CaptureKind, payload: impl Into<String>) -> Self {
        match kind {
            CaptureKind::Text => CaptureKey::Text(payload.into()),
            CaptureKind::Image => CaptureKey::Image(payload.into()),
        }
    }

    /// Same rule the store applies when deduplicating on `add`.
    pub fn matches(&self, item: &ShelfItem) -> bool {
        match (self, item) {
            (CaptureKey::Text(content), ShelfItem::Text(text)) => text.content == *content,
            (CaptureKey::Image(locator), ShelfItem::Image(image)) => {
                image_matches_locator(image, locator)
            }
            _ => false,
        }
    }
}

impl From<&ShelfItem> for CaptureKey {
    fn from(item: &ShelfItem) -> Self {
        match item {
            ShelfItem::Text(text) => CaptureKey::Text(text.content.clone()),
            ShelfItem::Image(image) => CaptureKey::Image(image.origin().to_string()),
        }
    }
}
