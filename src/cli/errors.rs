//! CLI error types.
//!
//! Every CLI failure is fatal: it surfaces to `main`, which prints it and
//! exits non-zero.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
