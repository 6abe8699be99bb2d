//! JSON encoding of the whole shelf sequence.
//!
//! The top level must be an array; anything else is `Corrupt`. Individual
//! entries that fail to decode are dropped and reported in `Decoded::dropped`.

use std::collections::HashSet;

use shelf_core::ports::PersistenceError;
use shelf_core::ShelfItem;

use super::stored_record::{MalformedRecordError, StoredRecord};

#[derive(Debug, Default)]
pub struct Decoded {
    pub items: Vec<ShelfItem>,
    pub dropped: Vec<MalformedRecordError>,
}

pub fn encode(items: &[ShelfItem]) -> Result<Vec<u8>, PersistenceError> {
    let records: Vec<StoredRecord> = items.iter().map(StoredRecord::from).collect();
    serde_json::to_vec(&records).map_err(|e| PersistenceError::Write(e.to_string()))
}

pub fn decode(bytes: &[u8]) -> Result<Decoded, PersistenceError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

    let mut decoded = Decoded::default();
    let mut seen = HashSet::new();

    for entry in entries {
        let item = serde_json::from_value::<StoredRecord>(entry)
            .map_err(|e| MalformedRecordError::Invalid(e.to_string()))
            .and_then(ShelfItem::try_from);

        match item {
            Ok(item) if !seen.insert(item.id()) => decoded
                .dropped
                .push(MalformedRecordError::DuplicateId(item.id().value())),
            Ok(item) => decoded.items.push(item),
            Err(err) => decoded.dropped.push(err),
        }
    }

    Ok(decoded)
}
