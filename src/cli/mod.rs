//! CLI module for feedsdb
//!
//! Provides command-line interface for:
//! - serve: boot the core and run the HTTP server
//! - dump: print counters and data keys in store order
//! - populate: fill the store with test data

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{boot, dump, populate, run, serve, Subsystems};
pub use errors::{CliError, CliResult};
