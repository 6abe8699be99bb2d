//! SideShelf application layer
//!
//! Use cases over the shelf ports: the clipboard store itself and the
//! inbound capture handler the clipboard notifier calls.

pub mod usecases;

pub use usecases::{CaptureClipboard, CaptureOutcome, ClipboardStore, StoreError};
