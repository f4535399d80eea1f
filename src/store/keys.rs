//! Key construction for the ordered keyspace.
//!
//! Every durable key in the database is built here; no other module
//! concatenates key strings. The keyspace is partitioned by fixed
//! prefixes:
//!
//! - `/system/counters/<name>` — named counter cells
//! - `/data/feeds/<feedId>` — feed records
//! - `/data/articles/<feedId>/<articleId>` — article records
//! - `/data/users/<userId>` — user records
//!
//! # Ordering invariant
//!
//! Prefix scans are the only query primitive, so byte-lexicographic key
//! order must equal numeric ID order for every sibling group. IDs are
//! therefore rendered as zero-padded 20-digit decimal (`u64::MAX` is 20
//! digits). Unpadded decimal would break ordering the moment sibling IDs
//! straddle a digit-count boundary ("9" sorts after "10").

/// Root prefix for internal bookkeeping state.
pub const SYSTEM_PREFIX: &str = "/system";

/// Prefix for counter cells, under the system namespace.
pub const COUNTERS_PREFIX: &str = "/system/counters";

/// Root prefix for application records.
pub const DATA_PREFIX: &str = "/data";

/// Counter name for feed ID allocation.
pub const FEEDS_COUNTER: &str = "/feeds";

/// Counter name for user ID allocation.
pub const USERS_COUNTER: &str = "/users";

/// Logical prefix (within the data namespace) for feed records.
pub const FEEDS_PREFIX: &str = "/feeds/";

/// Logical prefix (within the data namespace) for user records.
pub const USERS_PREFIX: &str = "/users/";

/// Width of an encoded ID, in decimal digits.
const ID_WIDTH: usize = 20;

/// Encode an ID so that lexicographic order equals numeric order.
pub fn encode_id(id: u64) -> String {
    format!("{:0width$}", id, width = ID_WIDTH)
}

/// Counter name for article ID allocation within one feed.
pub fn article_counter(feed_id: u64) -> String {
    format!("/articles/{}", encode_id(feed_id))
}

/// Logical key of a feed record.
pub fn feed_record(feed_id: u64) -> String {
    format!("{}{}", FEEDS_PREFIX, encode_id(feed_id))
}

/// Logical prefix under which one feed's articles live.
pub fn articles_prefix(feed_id: u64) -> String {
    format!("/articles/{}/", encode_id(feed_id))
}

/// Logical key of an article record.
pub fn article_record(feed_id: u64, article_id: u64) -> String {
    format!("{}{}", articles_prefix(feed_id), encode_id(article_id))
}

/// Logical key of a user record.
pub fn user_record(user_id: u64) -> String {
    format!("{}{}", USERS_PREFIX, encode_id(user_id))
}

/// Full key of a counter cell.
pub fn counter_key(name: &str) -> String {
    format!("{}{}", COUNTERS_PREFIX, name)
}
