//! On-disk persistence of the shelf record.

use std::sync::Arc;

use shelf_core::ports::{PersistenceError, RecordStorePort, ShelfRepositoryPort};
use shelf_core::{ImageItem, ItemId, ShelfItem};
use shelf_infra::{FileRecordStore, RecordShelfRepository};
use tempfile::TempDir;

fn repo_in(temp: &TempDir) -> RecordShelfRepository {
    RecordShelfRepository::new(Arc::new(FileRecordStore::new(temp.path())), "items")
}

#[tokio::test]
async fn shelf_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let items = vec![
        ShelfItem::new_text(ItemId::new(1_700_000_000_002), "second", 1_700_000_000_002),
        ShelfItem::Image(ImageItem {
            id: ItemId::new(1_700_000_000_001),
            local_uri: "file:///vault/img_1.png".into(),
            source_uri: Some("https://example.com/a.png".into()),
            captured_at_ms: 1_700_000_000_001,
        }),
    ];

    repo_in(&temp).save(&items).await.unwrap();
    let reloaded = repo_in(&temp).load().await.unwrap();

    assert_eq!(reloaded, items);
    assert!(temp.path().join("items.json").exists());
}

#[tokio::test]
async fn record_written_by_older_build_loads_what_it_can() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("items.json"),
        br#"[
            {"type":"text","id":3,"timestamp":3,"content":"ok"},
            {"type":"file","id":2,"timestamp":2,"path":"/tmp/x"},
            {"type":"image","id":1,"timestamp":1,"local_uri":"file:///vault/img.png"}
        ]"#,
    )
    .unwrap();

    let items = repo_in(&temp).load().await.unwrap();

    let ids: Vec<i64> = items.iter().map(|i| i.id().value()).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(items[1].as_image().unwrap().source_uri, None);
}

#[tokio::test]
async fn truncated_record_is_corrupt() {
    let temp = TempDir::new().unwrap();
    let store = FileRecordStore::new(temp.path());
    store.put("items", br#"[{"type":"text","id":1"#).await.unwrap();

    let err = repo_in(&temp).load().await.expect_err("truncated");

    assert!(matches!(err, PersistenceError::Corrupt(_)));
}
