//! # shelf-core
//!
//! Core domain models and ports for the SideShelf clipboard store.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod config;
pub mod ids;
pub mod item;
pub mod locator;
pub mod ports;
pub mod retention;

// Re-export commonly used types at the crate root
pub use config::ShelfConfig;
pub use ids::ItemId;
pub use item::{CaptureKey, CaptureKind, ImageItem, ShelfItem, TextItem};
pub use retention::RetentionPolicy;
