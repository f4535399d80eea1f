//! Storage error types.
//!
//! Engine failures are never retried here; they propagate to the caller,
//! which has no transactional rollback available for partially applied
//! writes.

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the ordered store and the layers directly on it
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying engine reported an I/O or corruption error
    #[error("storage engine error: {0}")]
    Engine(#[from] rocksdb::Error),

    /// The store handle was closed; no further operations are possible
    #[error("store is closed")]
    Closed,

    /// A stored value failed to decode
    #[error("corrupt value under key {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    /// Corrupt-value error with the offending key for context
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
