//! Users and their per-feed read positions.
//!
//! A subscription is an entry in the user's cursor map, not a standalone
//! record: presence of the feed key means subscribed. Every mutation
//! rewrites the whole user record (read-modify-write on one key), so
//! `subscribe`/`unsubscribe`/`consume_feeds` serialize per user to
//! prevent lost updates. Reads take no lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::catalog::FeedCatalog;
use crate::model::{Feed, User};
use crate::store::{keys, CounterAllocator, RecordStore};

use super::errors::{LedgerError, LedgerResult};

/// Per-user subscription state and batch feed consumption.
pub struct SubscriptionLedger {
    counters: Arc<CounterAllocator>,
    records: Arc<RecordStore>,
    catalog: Arc<FeedCatalog>,
    user_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl SubscriptionLedger {
    pub fn new(
        counters: Arc<CounterAllocator>,
        records: Arc<RecordStore>,
        catalog: Arc<FeedCatalog>,
    ) -> Self {
        Self {
            counters,
            records,
            catalog,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new user with a freshly allocated ID and no subscriptions.
    pub fn create_user(&self) -> LedgerResult<User> {
        let id = self.counters.increment(keys::USERS_COUNTER)?;

        let user = User::empty(id);
        self.put_user(&user)?;

        Ok(user)
    }

    /// Fetch one user record.
    pub fn get_user(&self, user_id: u64) -> LedgerResult<User> {
        let payload = self
            .records
            .get(&keys::user_record(user_id))?
            .ok_or(LedgerError::UserNotFound(user_id))?;

        Ok(serde_json::from_slice(&payload)?)
    }

    /// Enumerate all users.
    pub fn list_users(&self) -> LedgerResult<Vec<User>> {
        let mut users = Vec::new();

        for payload in self.records.scan(keys::USERS_PREFIX, None)? {
            users.push(serde_json::from_slice(&payload?)?);
        }

        Ok(users)
    }

    /// Subscribe `user_id` to `feed_id`, placing the cursor at the feed's
    /// most recent article (the floor for an empty feed). A new
    /// subscriber starts ahead of history and sees only articles
    /// published afterwards. Idempotent: an existing subscription is
    /// returned unchanged.
    pub fn subscribe(&self, user_id: u64, feed_id: u64) -> LedgerResult<User> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();

        let mut user = self.get_user(user_id)?;

        if !user.feeds.contains_key(&feed_id) {
            let cursor = self.catalog.latest_article_id(feed_id)?;
            user.feeds.insert(feed_id, cursor);
            self.put_user(&user)?;
        }

        Ok(user)
    }

    /// Remove `feed_id` from the user's subscriptions. Idempotent:
    /// removing an absent entry is a no-op, not an error.
    pub fn unsubscribe(&self, user_id: u64, feed_id: u64) -> LedgerResult<User> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().unwrap();

        let mut user = self.get_user(user_id)?;

        if user.feeds.remove(&feed_id).is_some() {
            self.put_user(&user)?;
        }

        Ok(user)
    }

    /// Merge explicit cursors over the user's stored map, persist the
    /// merged record, then fetch one page per subscribed feed at its
    /// stored cursor.
    ///
    /// The merge is a single-key rewrite and therefore all-or-nothing;
    /// it is persisted before any page is validated, so a failing cursor
    /// is still recorded. Page fetching aborts on the first unknown feed
    /// or out-of-range cursor.
    pub fn consume_feeds(
        &self,
        user_id: u64,
        start_ids: BTreeMap<u64, u64>,
    ) -> LedgerResult<Vec<Feed>> {
        let user = {
            let lock = self.user_lock(user_id);
            let _guard = lock.lock().unwrap();

            let mut user = self.get_user(user_id)?;
            user.feeds.extend(start_ids);
            self.put_user(&user)?;

            user
        };

        let mut pages = Vec::with_capacity(user.feeds.len());
        for (feed_id, cursor) in &user.feeds {
            pages.push(self.catalog.feed_page(*feed_id, Some(*cursor))?);
        }

        Ok(pages)
    }

    fn put_user(&self, user: &User) -> LedgerResult<()> {
        self.records
            .put(&keys::user_record(user.id), &serde_json::to_vec(user)?)?;

        Ok(())
    }

    fn user_lock(&self, user_id: u64) -> Arc<Mutex<()>> {
        let mut registry = self.user_locks.lock().unwrap();
        registry
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
