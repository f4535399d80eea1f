//! feedsdb - A feed-publishing service on an embedded ordered key-value store
//!
//! Producers create feeds and append articles; consumers track per-feed
//! read cursors. All durable state lives in one lexicographically
//! ordered keyspace, accessed only through byte-exact get/put and prefix
//! scans.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod ledger;
pub mod model;
pub mod rest_api;
pub mod store;
