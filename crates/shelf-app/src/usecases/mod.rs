//! [clipboard notifier]
//          ↓
// CaptureClipboard  (blank filter, pre-filter, id allocation)
//          ↓
// ClipboardStore    (dedup, materialize, retention, persist)
//          ↓
// list() → presentation

pub mod capture_clipboard;
pub mod clipboard_store;

pub use capture_clipboard::{CaptureClipboard, CaptureOutcome};
pub use clipboard_store::{ClipboardStore, StoreError};
