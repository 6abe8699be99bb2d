//! Shelf item domain models.
mod capture;
mod matching;
mod shelf_item;

pub use capture::{CaptureKey, CaptureKind};
pub use matching::{find_same_capture, is_same_capture};
pub use shelf_item::{ImageItem, ShelfItem, TextItem};

#[cfg(test)]
mod tests;
