pub mod fs;
pub mod record;
pub mod source;
pub mod time;

pub use fs::{FileRecordStore, FsAssetVault};
pub use record::{InMemoryRecordStore, RecordShelfRepository};
pub use source::{HttpAssetSource, LocalFileSource, SchemeAssetSource};
pub use time::SystemClock;
