use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use shelf_core::ports::ClockPort;
use shelf_core::{CaptureKey, CaptureKind, ItemId, ShelfItem};
use tracing::debug;

use super::{ClipboardStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    Stored(ItemId),
    /// The newest item already holds this content.
    Duplicate,
    /// Nothing worth keeping (blank text, empty locator).
    Ignored,
}

/// Entry point for the clipboard notifier.
pub struct CaptureClipboard {
    store: Arc<ClipboardStore>,
    clock: Arc<dyn ClockPort>,
    ids: IdAllocator,
}

impl CaptureClipboard {
    /// Seeds id allocation from the largest id already on the shelf.
    pub async fn new(store: Arc<ClipboardStore>, clock: Arc<dyn ClockPort>) -> Self {
        let seed = store.max_id().await.map(ItemId::value).unwrap_or(0);
        Self {
            store,
            clock,
            ids: IdAllocator::new(seed),
        }
    }

    #[tracing::instrument(
        name = "usecase.capture_clipboard.on_capture",
        skip(self, payload)
    )]
    pub async fn on_capture(
        &self,
        kind: CaptureKind,
        payload: &str,
        observed_at: i64,
    ) -> Result<CaptureOutcome, StoreError> {
        let blank = match kind {
            CaptureKind::Text => payload.trim().is_empty(),
            CaptureKind::Image => payload.is_empty(),
        };
        if blank {
            debug!("Ignoring blank capture");
            return Ok(CaptureOutcome::Ignored);
        }

        let key = CaptureKey::new(kind, payload);
        if self.store.is_duplicate_of_most_recent(&key).await {
            debug!("Capture matches the newest item");
            return Ok(CaptureOutcome::Duplicate);
        }

        let id = self.ids.next(self.clock.now_ms());
        let candidate = match kind {
            CaptureKind::Text => ShelfItem::new_text(id, payload, observed_at),
            CaptureKind::Image => ShelfItem::new_image(id, payload, observed_at),
        };
        self.store.add(candidate).await?;
        Ok(CaptureOutcome::Stored(id))
    }
}

/// Millisecond-based ids that never repeat, even within one millisecond or
/// when the wall clock steps back.
struct IdAllocator {
    last: AtomicI64,
}

impl IdAllocator {
    fn new(seed: i64) -> Self {
        Self {
            last: AtomicI64::new(seed),
        }
    }

    fn next(&self, now_ms: i64) -> ItemId {
        let bump = |last: i64| now_ms.max(last.saturating_add(1));
        let id = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(prev) | Err(prev) => bump(prev),
        };
        ItemId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_the_clock() {
        let ids = IdAllocator::new(0);

        assert_eq!(ids.next(1_000).value(), 1_000);
        assert_eq!(ids.next(2_000).value(), 2_000);
    }

    #[test]
    fn ids_are_unique_within_one_millisecond() {
        let ids = IdAllocator::new(0);

        let a = ids.next(5);
        let b = ids.next(5);
        let c = ids.next(5);

        assert_eq!((a.value(), b.value(), c.value()), (5, 6, 7));
    }

    #[test]
    fn ids_never_go_below_seed() {
        let ids = IdAllocator::new(9_000);

        assert_eq!(ids.next(100).value(), 9_001);
    }
}
