use super::*;
use crate::ids::ItemId;

fn materialized(id: i64, local: &str, source: &str) -> ShelfItem {
    ShelfItem::Image(ImageItem {
        id: ItemId::new(id),
        local_uri: local.to_string(),
        source_uri: Some(source.to_string()),
        captured_at_ms: id,
    })
}

#[test]
fn text_matches_only_identical_content() {
    let existing = ShelfItem::new_text(ItemId::new(1), "hello", 0);

    assert!(is_same_capture(
        &existing,
        &ShelfItem::new_text(ItemId::new(2), "hello", 10)
    ));
    assert!(!is_same_capture(
        &existing,
        &ShelfItem::new_text(ItemId::new(2), "hello ", 10)
    ));
    assert!(!is_same_capture(
        &existing,
        &ShelfItem::new_image(ItemId::new(2), "hello", 10)
    ));
}

#[test]
fn raw_image_capture_matches_materialized_item_by_source() {
    let existing = materialized(1, "file:///vault/img_1.png", "content://media/1");
    let candidate = ShelfItem::new_image(ItemId::new(2), "content://media/1", 5);

    assert!(is_same_capture(&existing, &candidate));
}

#[test]
fn image_matches_by_local_uri_when_sources_differ() {
    let existing = materialized(1, "file:///vault/img_1.png", "content://media/1");
    let candidate = materialized(2, "file:///vault/img_1.png", "content://media/2");

    assert!(is_same_capture(&existing, &candidate));
}

#[test]
fn distinct_images_do_not_match() {
    let existing = materialized(1, "file:///vault/img_1.png", "content://media/1");
    let candidate = ShelfItem::new_image(ItemId::new(2), "content://media/2", 5);

    assert!(!is_same_capture(&existing, &candidate));
}

#[test]
fn find_same_capture_returns_first_match_position() {
    let items = vec![
        ShelfItem::new_text(ItemId::new(3), "c", 3),
        ShelfItem::new_text(ItemId::new(2), "b", 2),
        ShelfItem::new_text(ItemId::new(1), "a", 1),
    ];
    let candidate = ShelfItem::new_text(ItemId::new(4), "b", 4);

    assert_eq!(find_same_capture(&items, &candidate), Some(1));
    assert_eq!(
        find_same_capture(&items, &ShelfItem::new_text(ItemId::new(5), "z", 5)),
        None
    );
}

#[test]
fn capture_key_uses_dedup_rule() {
    let image = materialized(1, "file:///vault/img_1.png", "content://media/1");

    assert!(CaptureKey::Image("content://media/1".into()).matches(&image));
    assert!(CaptureKey::Image("file:///vault/img_1.png".into()).matches(&image));
    assert!(!CaptureKey::Text("content://media/1".into()).matches(&image));
    assert_eq!(
        CaptureKey::from(&image),
        CaptureKey::Image("content://media/1".into())
    );
}

#[test]
fn degraded_image_origin_is_its_locator() {
    let ShelfItem::Image(image) = ShelfItem::new_image(ItemId::new(1), "content://x", 0) else {
        unreachable!()
    };
    assert_eq!(image.origin(), "content://x");
}
