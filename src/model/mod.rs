//! Entity types crossing the service boundary.
//!
//! Entities reference each other only by numeric ID; record payloads are
//! their JSON serializations. The catalog and ledger own (de)serialization
//! and the storage layers never see structured data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named feed. `articles` carries at most one page: the full history is
/// never materialized in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Feed {
    /// A feed identity with no article window attached.
    pub fn empty(id: u64) -> Self {
        Self {
            id,
            articles: Vec::new(),
        }
    }
}

/// An immutable article. IDs are sequential within the owning feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: u64,
    pub text: String,
}

/// A user and their subscriptions: a map from feed ID to the last
/// acknowledged article ID (the cursor paging resumes at). Presence of a
/// key means subscribed. BTreeMap keeps iteration and JSON output
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub feeds: BTreeMap<u64, u64>,
}

impl User {
    /// A user with no subscriptions.
    pub fn empty(id: u64) -> Self {
        Self {
            id,
            feeds: BTreeMap::new(),
        }
    }
}

/// A named counter's current value, as reported by the counters listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub name: String,
    pub value: u64,
}
