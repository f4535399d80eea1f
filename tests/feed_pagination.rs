//! Feed creation, publishing, and paging window tests.
//!
//! - Article IDs are sequential within their feed, starting at the floor
//! - Default page is the most recent PAGE_SIZE articles
//! - An explicit start must lie in [floor, article_count]; equality at
//!   the upper bound is the steady-state empty page
//! - Unknown feeds fail with FeedNotFound

use std::sync::Arc;

use feedsdb::catalog::{CatalogError, FeedCatalog, PAGE_SIZE};
use feedsdb::store::{keys, CounterAllocator, OrderedStore, RecordStore, DEFAULT_FLOOR};
use tempfile::TempDir;

fn open_catalog() -> (TempDir, Arc<CounterAllocator>, FeedCatalog) {
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(OrderedStore::open(dir.path()).expect("open store"));
    let counters = Arc::new(CounterAllocator::new(store.clone()));
    let records = Arc::new(RecordStore::new(store));
    let catalog = FeedCatalog::new(counters.clone(), records);
    (dir, counters, catalog)
}

fn publish_n(catalog: &FeedCatalog, feed_id: u64, n: usize) {
    for i in 0..n {
        catalog
            .publish_article(feed_id, format!("article {}", i))
            .unwrap();
    }
}

// =============================================================================
// Creation and publishing
// =============================================================================

#[test]
fn test_publish_allocates_sequential_ids_in_publish_order() {
    let (_dir, counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    assert_eq!(feed.id, DEFAULT_FLOOR);
    assert!(feed.articles.is_empty());

    for i in 0..256u64 {
        let article = catalog
            .publish_article(feed.id, format!("a{}", i))
            .unwrap();
        assert_eq!(article.id, DEFAULT_FLOOR + i);
    }

    // The per-feed counter now reports one past the last article.
    assert_eq!(
        counters.read(&keys::article_counter(feed.id)).unwrap(),
        DEFAULT_FLOOR + 256
    );
}

#[test]
fn test_feed_ids_are_sequential_across_creations() {
    let (_dir, _counters, catalog) = open_catalog();

    for i in 0..5u64 {
        assert_eq!(catalog.create_feed().unwrap().id, DEFAULT_FLOOR + i);
    }
}

#[test]
fn test_publish_to_unknown_feed_fails() {
    let (_dir, _counters, catalog) = open_catalog();

    let result = catalog.publish_article(DEFAULT_FLOOR, "orphan".to_string());
    assert!(matches!(result, Err(CatalogError::FeedNotFound(id)) if id == DEFAULT_FLOOR));
}

#[test]
fn test_list_feeds_returns_identities_without_articles() {
    let (_dir, _counters, catalog) = open_catalog();

    let a = catalog.create_feed().unwrap();
    let b = catalog.create_feed().unwrap();
    publish_n(&catalog, a.id, 3);

    let feeds = catalog.list_feeds().unwrap();
    assert_eq!(
        feeds.iter().map(|f| f.id).collect::<Vec<_>>(),
        vec![a.id, b.id]
    );
    assert!(feeds.iter().all(|f| f.articles.is_empty()));
}

// =============================================================================
// Paging windows
// =============================================================================

#[test]
fn test_default_page_is_most_recent_window() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    publish_n(&catalog, feed.id, 266);

    let page = catalog.feed_page(feed.id, None).unwrap();
    assert_eq!(page.articles.len(), PAGE_SIZE);
    assert_eq!(page.articles.first().unwrap().id, DEFAULT_FLOOR + 216);
    assert_eq!(page.articles.last().unwrap().id, DEFAULT_FLOOR + 265);
}

#[test]
fn test_explicit_start_returns_remaining_tail() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    publish_n(&catalog, feed.id, 266);

    let page = catalog.feed_page(feed.id, Some(DEFAULT_FLOOR + 250)).unwrap();
    assert_eq!(page.articles.len(), 16);
    assert_eq!(page.articles.first().unwrap().id, DEFAULT_FLOOR + 250);
    assert_eq!(page.articles.last().unwrap().id, DEFAULT_FLOOR + 265);
}

#[test]
fn test_start_at_article_count_yields_empty_page() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    publish_n(&catalog, feed.id, 266);

    // article_count is one past the last ID: the "no new articles" poll.
    let page = catalog
        .feed_page(feed.id, Some(DEFAULT_FLOOR + 266))
        .unwrap();
    assert!(page.articles.is_empty());
}

#[test]
fn test_start_outside_bounds_is_rejected() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    publish_n(&catalog, feed.id, 266);

    let below = catalog.feed_page(feed.id, Some(DEFAULT_FLOOR - 1));
    assert!(matches!(
        below,
        Err(CatalogError::StartIdOutOfRange { .. })
    ));

    let above = catalog.feed_page(feed.id, Some(DEFAULT_FLOOR + 267));
    assert!(matches!(
        above,
        Err(CatalogError::StartIdOutOfRange { .. })
    ));
}

#[test]
fn test_empty_feed_default_page_is_empty() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    let page = catalog.feed_page(feed.id, None).unwrap();
    assert!(page.articles.is_empty());

    // The floor itself is a valid explicit start on an empty feed.
    let page = catalog.feed_page(feed.id, Some(DEFAULT_FLOOR)).unwrap();
    assert!(page.articles.is_empty());
}

#[test]
fn test_page_of_unknown_feed_fails() {
    let (_dir, _counters, catalog) = open_catalog();

    assert!(matches!(
        catalog.feed_page(DEFAULT_FLOOR + 7, None),
        Err(CatalogError::FeedNotFound(_))
    ));
}

#[test]
fn test_short_feed_default_page_returns_everything() {
    let (_dir, _counters, catalog) = open_catalog();

    let feed = catalog.create_feed().unwrap();
    publish_n(&catalog, feed.id, 10);

    let page = catalog.feed_page(feed.id, None).unwrap();
    assert_eq!(page.articles.len(), 10);
    assert_eq!(page.articles.first().unwrap().id, DEFAULT_FLOOR);
}

// =============================================================================
// Article windows never bleed across feeds
// =============================================================================

#[test]
fn test_pages_are_scoped_to_their_feed() {
    let (_dir, _counters, catalog) = open_catalog();

    let a = catalog.create_feed().unwrap();
    let b = catalog.create_feed().unwrap();
    publish_n(&catalog, a.id, 3);
    publish_n(&catalog, b.id, 60);

    let page_a = catalog.feed_page(a.id, None).unwrap();
    assert_eq!(page_a.articles.len(), 3);

    let page_b = catalog.feed_page(b.id, None).unwrap();
    assert_eq!(page_b.articles.len(), PAGE_SIZE);
    assert_eq!(page_b.articles.first().unwrap().id, DEFAULT_FLOOR + 10);
}
