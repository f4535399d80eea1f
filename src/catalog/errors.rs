//! Feed catalog error types.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by feed and article operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No feed record exists for the given ID
    #[error("feed {0} not found")]
    FeedNotFound(u64),

    /// A caller-supplied page cursor lies outside the valid window
    #[error("start id {start_id} outside [{floor}, {limit}]")]
    StartIdOutOfRange {
        start_id: u64,
        floor: u64,
        limit: u64,
    },

    /// Storage failure; not recoverable at this layer
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored record failed to (de)serialize
    #[error("record codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
