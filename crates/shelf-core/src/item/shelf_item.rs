use crate::ids::ItemId;

/// Text copied to the clipboard, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub id: ItemId,
    pub content: String,
    pub captured_at_ms: i64,
}

/// Image copied to the clipboard, stored by locator.
///
/// `local_uri` is a vault-owned file once materialized. When materialization
/// failed it still holds the original locator and `source_uri` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    pub id: ItemId,
    pub local_uri: String,
    pub source_uri: Option<String>,
    pub captured_at_ms: i64,
}

impl ImageItem {
    /// The locator this image was originally captured from.
    ///
    /// For a materialized image this is `source_uri`; for an image that was local
    /// from the start, or that could not be materialized, it is `local_uri`.
    pub fn origin(&self) -> &str {
        self.source_uri.as_deref().unwrap_or(&self.local_uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShelfItem {
    Text(TextItem),
    Image(ImageItem),
}

impl ShelfItem {
    pub fn new_text(id: ItemId, content: impl Into<String>, captured_at_ms: i64) -> Self {
        ShelfItem::Text(TextItem {
            id,
            content: content.into(),
            captured_at_ms,
        })
    }

    /// A freshly observed image whose locator has not been materialized yet.
    pub fn new_image(id: ItemId, locator: impl Into<String>, captured_at_ms: i64) -> Self {
        ShelfItem::Image(ImageItem {
            id,
            local_uri: locator.into(),
            source_uri: None,
            captured_at_ms,
        })
    }

    pub fn id(&self) -> ItemId {
        match self {
            ShelfItem::Text(text) => text.id,
            ShelfItem::Image(image) => image.id,
        }
    }

    pub fn captured_at_ms(&self) -> i64 {
        match self {
            ShelfItem::Text(text) => text.captured_at_ms,
            ShelfItem::Image(image) => image.captured_at_ms,
        }
    }

    pub fn as_image(&self) -> Option<&ImageItem> {
        match self {
            ShelfItem::Image(image) => Some(image),
            ShelfItem::Text(_) => None,
        }
    }

    /// Locator of the local asset backing this item, if any.
    pub fn asset_locator(&self) -> Option<&str> {
        self.as_image().map(|image| image.local_uri.as_str())
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            ShelfItem::Text(_) => "text",
            ShelfItem::Image(_) => "image",
        }
    }
}
