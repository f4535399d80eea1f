//! CLI argument definitions using clap
//!
//! Commands:
//! - feedsdb serve --config <path>
//! - feedsdb dump --config <path>
//! - feedsdb populate --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// feedsdb - A feed-publishing service on an embedded ordered key-value store
#[derive(Parser, Debug)]
#[command(name = "feedsdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./feedsdb.json")]
        config: PathBuf,
    },

    /// Dump the database: counters first, then data keys
    Dump {
        /// Path to configuration file
        #[arg(long, default_value = "./feedsdb.json")]
        config: PathBuf,
    },

    /// Populate test data (feeds, articles, users, subscriptions)
    Populate {
        /// Path to configuration file
        #[arg(long, default_value = "./feedsdb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
