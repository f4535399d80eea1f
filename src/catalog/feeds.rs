//! Feed and article semantics over the storage layers.
//!
//! Feeds are immutable once created and own an append-only sequence of
//! articles. Article IDs come from a per-feed counter, so they are
//! sequential within their feed starting at the floor; feed IDs come
//! from the shared `/feeds` counter.
//!
//! Creation needs no locking beyond the allocator's own atomicity: ID
//! uniqueness alone guarantees two concurrent creations never collide on
//! a record key.

use std::cmp;
use std::sync::Arc;

use crate::model::{Article, Feed};
use crate::store::{keys, CounterAllocator, RecordStore};

use super::errors::{CatalogError, CatalogResult};

/// Maximum number of articles returned in one page.
pub const PAGE_SIZE: usize = 50;

/// Feed catalog: create feeds, publish articles, read paged windows.
pub struct FeedCatalog {
    counters: Arc<CounterAllocator>,
    records: Arc<RecordStore>,
}

impl FeedCatalog {
    pub fn new(counters: Arc<CounterAllocator>, records: Arc<RecordStore>) -> Self {
        Self { counters, records }
    }

    /// Create a new, empty feed with a freshly allocated ID.
    pub fn create_feed(&self) -> CatalogResult<Feed> {
        let id = self.counters.increment(keys::FEEDS_COUNTER)?;

        let feed = Feed::empty(id);
        self.records
            .put(&keys::feed_record(id), &serde_json::to_vec(&feed)?)?;

        Ok(feed)
    }

    /// Append an article to `feed_id` with the next sequential article ID.
    pub fn publish_article(&self, feed_id: u64, text: String) -> CatalogResult<Article> {
        self.require_feed(feed_id)?;

        let id = self.counters.increment(&keys::article_counter(feed_id))?;
        let article = Article { id, text };

        self.records.put(
            &keys::article_record(feed_id, id),
            &serde_json::to_vec(&article)?,
        )?;

        Ok(article)
    }

    /// Enumerate feed identities. Article windows are deliberately left
    /// empty: this only lists what feeds exist.
    pub fn list_feeds(&self) -> CatalogResult<Vec<Feed>> {
        let mut feeds = Vec::new();

        for payload in self.records.scan(keys::FEEDS_PREFIX, None)? {
            let stored: Feed = serde_json::from_slice(&payload?)?;
            feeds.push(Feed::empty(stored.id));
        }

        Ok(feeds)
    }

    /// Read one page of up to [`PAGE_SIZE`] articles in ascending ID order.
    ///
    /// Without `start_id`, returns the most recent page. With it, the
    /// cursor must lie in `[floor, article_count]`; equality at the upper
    /// bound is the steady-state "no new articles" case and yields an
    /// empty page.
    pub fn feed_page(&self, feed_id: u64, start_id: Option<u64>) -> CatalogResult<Feed> {
        self.require_feed(feed_id)?;

        // One past the last published article ID.
        let article_count = self.counters.read(&keys::article_counter(feed_id))?;
        let floor = self.counters.floor();

        let start_index = match start_id {
            Some(start_id) => {
                if start_id < floor || start_id > article_count {
                    return Err(CatalogError::StartIdOutOfRange {
                        start_id,
                        floor,
                        limit: article_count,
                    });
                }
                start_id
            }
            None => cmp::max(floor, article_count.saturating_sub(PAGE_SIZE as u64)),
        };

        let mut articles = Vec::with_capacity(PAGE_SIZE);
        let scan = self
            .records
            .scan(&keys::articles_prefix(feed_id), Some(&keys::encode_id(start_index)))?;

        for payload in scan.take(PAGE_SIZE) {
            articles.push(serde_json::from_slice::<Article>(&payload?)?);
        }

        Ok(Feed { id: feed_id, articles })
    }

    /// ID of the feed's most recently published article, or the floor if
    /// the feed has none. This is where a new subscriber's cursor starts.
    pub fn latest_article_id(&self, feed_id: u64) -> CatalogResult<u64> {
        self.require_feed(feed_id)?;

        let article_count = self.counters.read(&keys::article_counter(feed_id))?;
        let floor = self.counters.floor();

        if article_count == floor {
            Ok(floor)
        } else {
            Ok(article_count - 1)
        }
    }

    fn require_feed(&self, feed_id: u64) -> CatalogResult<()> {
        if self.records.get(&keys::feed_record(feed_id))?.is_none() {
            return Err(CatalogError::FeedNotFound(feed_id));
        }

        Ok(())
    }
}
