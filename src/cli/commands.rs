//! CLI command implementations.
//!
//! Every command loads the JSON configuration, opens the store, and
//! works through the same core subsystems the HTTP surface uses. `main`
//! stays logic-free; dispatch happens here.

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::catalog::FeedCatalog;
use crate::config::Config;
use crate::ledger::SubscriptionLedger;
use crate::rest_api::{self, AppState};
use crate::store::{keys, CounterAllocator, OrderedStore, RecordStore, DEFAULT_FLOOR};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Handles to the booted core subsystems.
pub struct Subsystems {
    pub store: Arc<OrderedStore>,
    pub counters: Arc<CounterAllocator>,
    pub catalog: Arc<FeedCatalog>,
    pub ledger: Arc<SubscriptionLedger>,
}

/// Open the store described by `config`, apply counter seeds, and wire
/// up the catalog and ledger.
pub fn boot(config: &Config) -> CliResult<Subsystems> {
    let store = Arc::new(OrderedStore::open(config.db_path())?);
    let counters = Arc::new(CounterAllocator::new(store.clone()));
    let records = Arc::new(RecordStore::new(store.clone()));

    for (name, value) in &config.db.counters {
        info!("seeding counter {} = {}", name, value);
        counters.seed(name, *value)?;
    }

    let catalog = Arc::new(FeedCatalog::new(counters.clone(), records.clone()));
    let ledger = Arc::new(SubscriptionLedger::new(
        counters.clone(),
        records,
        catalog.clone(),
    ));

    Ok(Subsystems {
        store,
        counters,
        catalog,
        ledger,
    })
}

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    env_logger::init();

    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::Dump { config } => dump(&config),
        Command::Populate { config } => populate(&config),
    }
}

/// Boot the core and serve the HTTP API until interrupted.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let subsystems = boot(&config)?;

    let state = AppState {
        counters: subsystems.counters.clone(),
        catalog: subsystems.catalog.clone(),
        ledger: subsystems.ledger.clone(),
    };

    let addr = config.http.socket_addr();
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("serving on {}", addr);

        axum::serve(listener, rest_api::router(state)).await?;

        Ok(())
    })
}

/// Print every counter cell, then every data record.
pub fn dump(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = OrderedStore::open(config.db_path())?;

    println!("===== COUNTERS =====");
    for item in store.scan(keys::SYSTEM_PREFIX.as_bytes(), None)? {
        let (key, value) = item?;
        let value = match <[u8; 8]>::try_from(value.as_ref()) {
            Ok(bytes) => u64::from_be_bytes(bytes).to_string(),
            Err(_) => format!("<{} bytes>", value.len()),
        };
        println!("Counter {} => {}", String::from_utf8_lossy(&key), value);
    }

    println!("===== KEYS =====");
    for item in store.scan(keys::DATA_PREFIX.as_bytes(), None)? {
        let (key, value) = item?;
        println!(
            "{} => {}",
            String::from_utf8_lossy(&key),
            String::from_utf8_lossy(&value)
        );
    }

    Ok(())
}

/// Number of feeds created by `populate`.
const POPULATE_FEEDS: usize = 10;
/// Articles published per feed.
const POPULATE_ARTICLES: usize = 256;
/// Users created, each subscribing to the first five feeds.
const POPULATE_USERS: usize = 10;
const POPULATE_SUBSCRIPTIONS: u64 = 5;

/// Fill the store with test data: feeds with article history, then
/// users subscribed to the first few feeds.
pub fn populate(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let subsystems = boot(&config)?;

    info!("populating feeds");
    for i in 0..POPULATE_FEEDS {
        let feed = subsystems.catalog.create_feed()?;
        for j in 0..POPULATE_ARTICLES {
            subsystems
                .catalog
                .publish_article(feed.id, format!("f:{}a:{}", i, j))?;
        }
    }

    info!("populating users");
    for _ in 0..POPULATE_USERS {
        let user = subsystems.ledger.create_user()?;
        for j in 0..POPULATE_SUBSCRIPTIONS {
            subsystems.ledger.subscribe(user.id, DEFAULT_FLOOR + j)?;
        }
    }

    Ok(())
}
