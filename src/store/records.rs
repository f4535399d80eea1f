//! Record access over the `/data` namespace.
//!
//! Thin layer that composes the fixed data prefix onto logical keys and
//! hands back opaque byte payloads. Callers own their record formats;
//! this layer never inspects a value.

use std::sync::Arc;

use super::db::{OrderedStore, PrefixScan};
use super::errors::StoreResult;
use super::keys;

/// Payload-agnostic get/put/scan over the data namespace.
pub struct RecordStore {
    store: Arc<OrderedStore>,
}

impl RecordStore {
    pub fn new(store: Arc<OrderedStore>) -> Self {
        Self { store }
    }

    /// Fetch the record under a logical key (e.g. `/feeds/<id>`).
    pub fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.store.get(full_key(key).as_bytes())
    }

    /// Write the record under a logical key, overwriting any previous
    /// payload.
    pub fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.store.put(full_key(key).as_bytes(), value)
    }

    /// Scan record payloads under a logical prefix in ascending key
    /// order, optionally starting at `prefix ++ start`.
    pub fn scan(&self, prefix: &str, start: Option<&str>) -> StoreResult<RecordScan<'_>> {
        let inner = self.store.scan(
            full_key(prefix).as_bytes(),
            start.map(|s| s.as_bytes()),
        )?;

        Ok(RecordScan { inner })
    }
}

fn full_key(logical: &str) -> String {
    format!("{}{}", keys::DATA_PREFIX, logical)
}

/// Forward scan over record payloads; keys stay internal to the store.
pub struct RecordScan<'a> {
    inner: PrefixScan<'a>,
}

impl Iterator for RecordScan<'_> {
    type Item = StoreResult<Box<[u8]>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(Ok((_key, value))) => Some(Ok(value)),
            Some(Err(e)) => Some(Err(e)),
            None => None,
        }
    }
}
