//! Dedup predicate shared by `add` and the notifier pre-filter.
//!
//! Matching is a pure function over a snapshot; callers remove the matched
//! position afterwards instead of mutating while scanning.

use super::{ImageItem, ShelfItem};

pub(crate) fn image_matches_locator(existing: &ImageItem, locator: &str) -> bool {
    existing.origin() == locator || existing.local_uri == locator
}

fn images_match(existing: &ImageItem, candidate: &ImageItem) -> bool {
    existing.origin() == candidate.origin() || existing.local_uri == candidate.local_uri
}

/// Whether `existing` holds the same clipboard content as `candidate`.
///
/// - text: exact content equality
/// - image: same origin locator (the `source_uri`, or the `local_uri` when no
///   source is known), or the same `local_uri`
pub fn is_same_capture(existing: &ShelfItem, candidate: &ShelfItem) -> bool {
    match (existing, candidate) {
        (ShelfItem::Text(existing), ShelfItem::Text(candidate)) => {
            existing.content == candidate.content
        }
        (ShelfItem::Image(existing), ShelfItem::Image(candidate)) => {
            images_match(existing, candidate)
        }
        _ => false,
    }
}

/// Position of the first item matching `candidate`, in sequence order.
pub fn find_same_capture(items: &[ShelfItem], candidate: &ShelfItem) -> Option<usize> {
    items
        .iter()
        .position(|existing| is_same_capture(existing, candidate))
}
