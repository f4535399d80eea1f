//! Storage subsystem for feedsdb.
//!
//! All persistent state lives in one RocksDB instance with a flat,
//! lexicographically ordered byte keyspace, partitioned by prefix:
//!
//! - `/system/counters` — ID-allocation counter cells
//! - `/data` — application records (feeds, articles, users)
//!
//! # Design Principles
//!
//! - Prefix scans are the only query primitive
//! - Key construction is centralized in `keys`; IDs are zero-padded so
//!   byte order equals numeric order
//! - The store owns all durable bytes; higher layers are views
//!   materialized by (de)serializing record payloads

mod counters;
mod db;
mod errors;
pub mod keys;
mod records;

pub use counters::{CounterAllocator, DEFAULT_FLOOR};
pub use db::{OrderedStore, PrefixScan};
pub use errors::{StoreError, StoreResult};
pub use records::{RecordScan, RecordStore};
