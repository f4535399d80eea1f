//! Subscription ledger error types.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors surfaced by user and subscription operations
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No user record exists for the given ID
    #[error("user {0} not found")]
    UserNotFound(u64),

    /// A feed lookup failed (unknown feed or bad cursor)
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Storage failure; not recoverable at this layer
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored record failed to (de)serialize
    #[error("record codec error: {0}")]
    Codec(#[from] serde_json::Error),
}
