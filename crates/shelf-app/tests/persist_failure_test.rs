//! Rollback behaviour when the repository rejects a write.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use shelf_app::{ClipboardStore, StoreError};
use shelf_core::locator::file_locator;
use shelf_core::ports::{ClockPort, PersistenceError, ShelfRepositoryPort};
use shelf_core::{ItemId, RetentionPolicy, ShelfItem};
use shelf_infra::{FsAssetVault, LocalFileSource};
use tempfile::TempDir;

mock! {
    pub Repo {}

    #[async_trait]
    impl ShelfRepositoryPort for Repo {
        async fn load(&self) -> Result<Vec<ShelfItem>, PersistenceError>;
        async fn save(&self, items: &[ShelfItem]) -> Result<(), PersistenceError>;
    }
}

struct FixedClock(AtomicI64);

impl ClockPort for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

fn read_only_repo(existing: Vec<ShelfItem>) -> MockRepo {
    let mut repo = MockRepo::new();
    repo.expect_load().returning(move || Ok(existing.clone()));
    repo.expect_save()
        .returning(|_| Err(PersistenceError::Write("disk full".into())));
    repo
}

#[tokio::test]
async fn failed_save_leaves_shelf_and_vault_untouched() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("shot.png");
    std::fs::write(&source, b"\x89PNG\r\n\x1a\n").unwrap();
    let vault_dir = temp.path().join("vault");
    let clock = Arc::new(FixedClock(AtomicI64::new(10)));
    let vault = FsAssetVault::open(&vault_dir, Arc::new(LocalFileSource), clock.clone())
        .await
        .unwrap();
    let existing = vec![ShelfItem::new_text(ItemId::new(1), "kept", 5)];

    let store = ClipboardStore::open(
        Arc::new(vault),
        Arc::new(read_only_repo(existing.clone())),
        clock,
        RetentionPolicy::default(),
    )
    .await;

    let err = store
        .add(ShelfItem::new_image(ItemId::new(2), file_locator(&source), 10))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Persistence(PersistenceError::Write(_))));
    assert_eq!(store.list().await, existing);
    assert_eq!(std::fs::read_dir(&vault_dir).unwrap().count(), 0);
    assert!(source.exists());
}

#[tokio::test]
async fn failed_save_surfaces_from_every_mutation() {
    let temp = TempDir::new().unwrap();
    let clock = Arc::new(FixedClock(AtomicI64::new(10)));
    let vault = FsAssetVault::open(temp.path(), Arc::new(LocalFileSource), clock.clone())
        .await
        .unwrap();
    let existing = vec![
        ShelfItem::new_text(ItemId::new(2), "b", 9),
        ShelfItem::new_text(ItemId::new(1), "a", 8),
    ];

    let store = ClipboardStore::open(
        Arc::new(vault),
        Arc::new(read_only_repo(existing.clone())),
        clock,
        RetentionPolicy::default(),
    )
    .await;

    assert!(store.remove(ItemId::new(1)).await.is_err());
    assert!(store.clear_all().await.is_err());
    assert_eq!(store.list().await, existing);
}
