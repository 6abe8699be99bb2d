//! Port interfaces for the application layer
//!
//! Ports define the contract between the clipboard store and the
//! infrastructure that backs it, so the store logic stays independent of the
//! file system, the network and the storage engine.

mod asset_source;
mod asset_vault;
mod clock;
pub mod errors;
mod record_store;
mod shelf_repository;

pub use asset_source::{AssetSourcePort, AssetStream};
pub use asset_vault::AssetVaultPort;
pub use clock::ClockPort;
pub use errors::{MaterializationError, PersistenceError};
pub use record_store::RecordStorePort;
pub use shelf_repository::ShelfRepositoryPort;
