//! HTTP boundary for feedsdb.
//!
//! Exposes the catalog, ledger, and counter surface as a JSON API:
//!
//! - `GET/POST /v1/feeds`, `GET/POST /v1/feeds/{id}`
//! - `GET/POST /v1/users`, `GET /v1/users/{id}`
//! - `POST /v1/users/{id}/subscribe|unsubscribe|consume`
//! - `GET /v1/counters`
//!
//! Entities cross this boundary as their JSON serializations; all
//! invariants live below, in the core.

mod errors;
mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use server::{router, AppState};
