//! RocksDB-backed ordered store.
//!
//! Wraps a single embedded RocksDB instance and exposes the only three
//! primitives the rest of the system is allowed to use:
//!
//! - byte-exact `get`/`put`
//! - forward prefix scans in byte-lexicographic key order
//!
//! There is no secondary index and no query planner; every higher-level
//! "list" or "page" operation is a prefix scan with a chosen start key.
//! Iterators pin a consistent view of the database when created, so
//! concurrent writes never crash an in-flight scan.

use std::path::{Path, PathBuf};

use rocksdb::{DBIteratorWithThreadMode, Direction, IteratorMode, Options, DB};

use super::errors::{StoreError, StoreResult};

/// Ordered, durable key-value store.
///
/// Shared across callers behind an `Arc`; all operations take `&self`.
/// Dropping the store releases the engine. `close` exists for explicit
/// shutdown and requires exclusive access.
pub struct OrderedStore {
    /// `None` once closed; every operation checks this first.
    db: Option<DB>,
    path: PathBuf,
}

impl OrderedStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path.as_ref())?;

        Ok(Self {
            db: Some(db),
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Database directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch the value stored under `key`. A missing key is `Ok(None)`,
    /// never an error.
    pub fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let db = self.engine()?;
        Ok(db.get(key)?)
    }

    /// Store `value` under `key`, overwriting any previous value.
    pub fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let db = self.engine()?;
        db.put(key, value)?;
        Ok(())
    }

    /// Scan keys beginning with `prefix` in ascending order.
    ///
    /// If `start` is given, iteration begins at the first key >=
    /// `prefix ++ start`; otherwise at the first key carrying the prefix.
    /// The returned iterator is finite and forward-only; each call
    /// observes the store's state as of the call.
    pub fn scan(&self, prefix: &[u8], start: Option<&[u8]>) -> StoreResult<PrefixScan<'_>> {
        let db = self.engine()?;

        let mut seek = prefix.to_vec();
        if let Some(start) = start {
            seek.extend_from_slice(start);
        }

        let inner = db.iterator(IteratorMode::From(&seek, Direction::Forward));

        Ok(PrefixScan {
            inner,
            prefix: prefix.to_vec(),
            done: false,
        })
    }

    /// Release the engine. Subsequent operations fail with
    /// [`StoreError::Closed`].
    pub fn close(&mut self) {
        self.db = None;
    }

    fn engine(&self) -> StoreResult<&DB> {
        self.db.as_ref().ok_or(StoreError::Closed)
    }
}

/// Finite forward scan over one key prefix.
///
/// Yields `(key, value)` pairs in ascending key order and stops at the
/// first key outside the prefix. Exhaustion is signalled by `None`.
pub struct PrefixScan<'a> {
    inner: DBIteratorWithThreadMode<'a, DB>,
    prefix: Vec<u8>,
    done: bool,
}

impl Iterator for PrefixScan<'_> {
    type Item = StoreResult<(Box<[u8]>, Box<[u8]>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.inner.next() {
            Some(Ok((key, value))) => {
                if key.starts_with(&self.prefix) {
                    Some(Ok((key, value)))
                } else {
                    self.done = true;
                    None
                }
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(StoreError::Engine(e)))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
