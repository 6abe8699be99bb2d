pub mod app_data_dir;
pub mod asset_vault;
pub mod record_store;

pub use asset_vault::FsAssetVault;
pub use record_store::FileRecordStore;
