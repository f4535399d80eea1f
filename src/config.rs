//! Service configuration.
//!
//! Loaded from a JSON file (default `./feedsdb.json`):
//!
//! ```json
//! {
//!   "db":   { "path": "./feedsdb-data", "counters": { "/feeds": 10000 } },
//!   "http": { "host": "0.0.0.0", "port": 8080 }
//! }
//! ```
//!
//! `db.counters` pre-seeds counter cells at startup; a seed is applied
//! only while the counter still sits at its floor, so restarting never
//! rewinds live state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::DEFAULT_FLOOR;

/// Configuration load/validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database settings (required)
    pub db: DbConfig,

    /// HTTP server settings (optional, sensible defaults)
    #[serde(default)]
    pub http: HttpConfig,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// Database directory (required)
    pub path: String,

    /// Counter seeds applied at startup (optional)
    #[serde(default)]
    pub counters: BTreeMap<String, u64>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpConfig {
    /// Socket address string for the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load and validate configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.db.path.is_empty() {
            return Err(ConfigError::Invalid("db.path must not be empty".into()));
        }

        for (name, value) in &self.db.counters {
            if !name.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "counter name '{}' must start with '/'",
                    name
                )));
            }
            if *value < DEFAULT_FLOOR {
                return Err(ConfigError::Invalid(format!(
                    "counter seed '{}' = {} is below the floor {}",
                    name, value, DEFAULT_FLOOR
                )));
            }
        }

        Ok(())
    }

    /// Database directory as a path.
    pub fn db_path(&self) -> &Path {
        Path::new(&self.db.path)
    }
}
