use serde::{Deserialize, Serialize};
use shelf_core::{ImageItem, ItemId, ShelfItem, TextItem};
use thiserror::Error;

pub const TYPE_TEXT: &str = "text";
pub const TYPE_IMAGE: &str = "image";

/// One persisted entry.
///
/// `content` is set for text entries, `local_uri`/`source_uri` for images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
}

/// A stored entry that cannot be turned back into an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedRecordError {
    #[error("entry is not a valid record: {0}")]
    Invalid(String),

    #[error("entry {id} has unknown type `{kind}`")]
    UnknownType { id: i64, kind: String },

    #[error("{kind} entry {id} is missing `{field}`")]
    MissingField {
        id: i64,
        kind: &'static str,
        field: &'static str,
    },

    #[error("duplicate item id {0}")]
    DuplicateId(i64),
}

impl From<&ShelfItem> for StoredRecord {
    fn from(item: &ShelfItem) -> Self {
        match item {
            ShelfItem::Text(text) => StoredRecord {
                kind: TYPE_TEXT.to_string(),
                id: text.id.value(),
                timestamp: text.captured_at_ms,
                content: Some(text.content.clone()),
                local_uri: None,
                source_uri: None,
            },
            ShelfItem::Image(image) => StoredRecord {
                kind: TYPE_IMAGE.to_string(),
                id: image.id.value(),
                timestamp: image.captured_at_ms,
                content: None,
                local_uri: Some(image.local_uri.clone()),
                source_uri: image.source_uri.clone(),
            },
        }
    }
}

impl TryFrom<StoredRecord> for ShelfItem {
    type Error = MalformedRecordError;

    fn try_from(record: StoredRecord) -> Result<Self, Self::Error> {
        let id = record.id;
        match record.kind.as_str() {
            TYPE_TEXT => {
                let content = record
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .ok_or(MalformedRecordError::MissingField {
                        id,
                        kind: TYPE_TEXT,
                        field: "content",
                    })?;
                Ok(ShelfItem::Text(TextItem {
                    id: ItemId::new(id),
                    content,
                    captured_at_ms: record.timestamp,
                }))
            }
            TYPE_IMAGE => {
                let local_uri = record.local_uri.filter(|u| !u.is_empty()).ok_or(
                    MalformedRecordError::MissingField {
                        id,
                        kind: TYPE_IMAGE,
                        field: "local_uri",
                    },
                )?;
                Ok(ShelfItem::Image(ImageItem {
                    id: ItemId::new(id),
                    local_uri,
                    source_uri: record.source_uri.filter(|u| !u.is_empty()),
                    captured_at_ms: record.timestamp,
                }))
            }
            _ => Err(MalformedRecordError::UnknownType {
                id,
                kind: record.kind,
            }),
        }
    }
}
