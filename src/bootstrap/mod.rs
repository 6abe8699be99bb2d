//! Process bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use wiring::{resolve_data_dir, ShelfRuntime};
