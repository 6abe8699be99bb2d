//! Persisted form of the shelf: one JSON array stored under a single key.

pub mod codec;
mod memory_store;
mod repository;
mod stored_record;

pub use codec::{decode, encode, Decoded};
pub use memory_store::InMemoryRecordStore;
pub use repository::RecordShelfRepository;
pub use stored_record::{MalformedRecordError, StoredRecord};
