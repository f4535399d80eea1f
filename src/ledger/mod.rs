//! Subscription ledger subsystem.
//!
//! Manages user records and their feed-cursor maps, composing the feed
//! catalog (feed existence, article windows) with the record store
//! (durable user state).

mod errors;
mod users;

pub use errors::{LedgerError, LedgerResult};
pub use users::SubscriptionLedger;
