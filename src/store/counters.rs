//! Named counter cells: the ID allocation mechanism.
//!
//! Each counter lives under `/system/counters/<name>` as an 8-byte
//! big-endian integer. `increment` returns the pre-increment value, so
//! the first allocation from a fresh counter yields the floor.
//!
//! # Invariants
//!
//! - No two callers ever observe the same value for one name
//! - Values handed out for one name form a contiguous increasing sequence
//! - Counters for distinct names never affect each other
//!
//! Locking is per name: a registry hands out one mutex per counter, and
//! `increment` holds only its own counter's lock across the
//! read-modify-write. Reads take no lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use super::db::OrderedStore;
use super::errors::{StoreError, StoreResult};
use super::keys;

/// Starting value for every counter. Keeps real IDs distinguishable from
/// small test values and from the zero "not found" sentinel.
pub const DEFAULT_FLOOR: u64 = 10_000;

/// Allocator of strictly increasing per-name integer sequences.
pub struct CounterAllocator {
    store: Arc<OrderedStore>,
    floor: u64,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CounterAllocator {
    /// Allocator with the default floor of 10000.
    pub fn new(store: Arc<OrderedStore>) -> Self {
        Self::with_floor(store, DEFAULT_FLOOR)
    }

    /// Allocator with an explicit floor.
    pub fn with_floor(store: Arc<OrderedStore>, floor: u64) -> Self {
        Self {
            store,
            floor,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The minimum value any counter may hold.
    pub fn floor(&self) -> u64 {
        self.floor
    }

    /// Atomically advance `name` by one and return the pre-increment
    /// value. The first call for a fresh name returns the floor.
    pub fn increment(&self, name: &str) -> StoreResult<u64> {
        let lock = self.name_lock(name);
        let _guard = lock.lock().unwrap();

        let current = self.load(name)?;
        self.write(name, current + 1)?;

        Ok(current)
    }

    /// Current value of `name` without mutating it. An absent counter
    /// reads as the floor.
    pub fn read(&self, name: &str) -> StoreResult<u64> {
        self.load(name)
    }

    /// Snapshot of every counter currently stored, keyed by name with
    /// the namespace prefix stripped.
    pub fn list_all(&self) -> StoreResult<BTreeMap<String, u64>> {
        let mut counters = BTreeMap::new();

        for item in self.store.scan(keys::COUNTERS_PREFIX.as_bytes(), None)? {
            let (key, value) = item?;

            let name = std::str::from_utf8(&key[keys::COUNTERS_PREFIX.len()..])
                .map_err(|_| StoreError::corrupt(String::from_utf8_lossy(&key), "non-utf8 counter name"))?
                .to_string();

            counters.insert(name, decode_value(&key, &value)?);
        }

        Ok(counters)
    }

    /// Pre-populate `name` with `value`, but only if the counter has not
    /// advanced past its floor. Used to apply configured counter seeds at
    /// startup without clobbering live state.
    pub fn seed(&self, name: &str, value: u64) -> StoreResult<()> {
        let lock = self.name_lock(name);
        let _guard = lock.lock().unwrap();

        if self.load(name)? == self.floor {
            self.write(name, value)?;
        }

        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<u64> {
        let key = keys::counter_key(name);

        match self.store.get(key.as_bytes())? {
            Some(value) => decode_value(key.as_bytes(), &value),
            None => Ok(self.floor),
        }
    }

    fn write(&self, name: &str, value: u64) -> StoreResult<()> {
        let key = keys::counter_key(name);
        self.store.put(key.as_bytes(), &value.to_be_bytes())
    }

    fn name_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut registry = self.locks.lock().unwrap();
        registry
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

fn decode_value(key: &[u8], value: &[u8]) -> StoreResult<u64> {
    let bytes: [u8; 8] = value.try_into().map_err(|_| {
        StoreError::corrupt(
            String::from_utf8_lossy(key),
            format!("counter value is {} bytes, expected 8", value.len()),
        )
    })?;

    Ok(u64::from_be_bytes(bytes))
}
