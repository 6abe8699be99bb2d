//! Capacity and age limits applied after every store mutation.

use std::time::Duration;

use crate::item::ShelfItem;

/// Default capacity of the shelf.
pub const MAX_ITEMS: usize = 50;

/// Default maximum item age (7 days).
pub const TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_items: usize,
    pub ttl: Duration,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_items: MAX_ITEMS,
            ttl: TTL,
        }
    }
}

/// Result of applying a policy: survivors keep their order, evicted items are
/// handed back so the caller can release their assets.
#[derive(Debug, Default)]
pub struct Retained {
    pub kept: Vec<ShelfItem>,
    pub evicted: Vec<ShelfItem>,
}

impl RetentionPolicy {
    pub fn new(max_items: usize, ttl: Duration) -> Self {
        Self { max_items, ttl }
    }

    pub fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// An item expires once its age strictly exceeds the TTL.
    pub fn is_expired(&self, item: &ShelfItem, now_ms: i64) -> bool {
        now_ms.saturating_sub(item.captured_at_ms()) > self.ttl_ms()
    }

    /// TTL eviction only.
    pub fn expire(&self, items: Vec<ShelfItem>, now_ms: i64) -> Retained {
        let (evicted, kept): (Vec<ShelfItem>, Vec<ShelfItem>) = items
            .into_iter()
            .partition(|item| self.is_expired(item, now_ms));
        Retained { kept, evicted }
    }

    /// TTL eviction, then capacity eviction from the tail.
    pub fn apply(&self, items: Vec<ShelfItem>, now_ms: i64) -> Retained {
        let Retained {
            mut kept,
            mut evicted,
        } = self.expire(items, now_ms);

        if kept.len() > self.max_items {
            // Oldest first, matching the order items fall off the tail.
            evicted.extend(kept.drain(self.max_items..).rev());
        }

        Retained { kept, evicted }
    }
}
