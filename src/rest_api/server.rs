//! Axum HTTP surface over the core.
//!
//! Thin boundary layer: handlers translate HTTP parameters into calls on
//! the catalog, ledger, and counter allocator, and entities back into
//! JSON. The core is synchronous and embedded; call counts are small, so
//! handlers invoke it directly.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::catalog::FeedCatalog;
use crate::ledger::SubscriptionLedger;
use crate::model::{Article, Counter, Feed, User};
use crate::store::CounterAllocator;

use super::errors::RestResult;

/// Shared handles to the core subsystems.
#[derive(Clone)]
pub struct AppState {
    pub counters: Arc<CounterAllocator>,
    pub catalog: Arc<FeedCatalog>,
    pub ledger: Arc<SubscriptionLedger>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/feeds", get(list_feeds).post(create_feed))
        .route("/v1/feeds/:id", get(show_feed).post(publish_article))
        .route("/v1/users", get(list_users).post(create_user))
        .route("/v1/users/:id", get(show_user))
        .route("/v1/users/:id/subscribe", post(subscribe))
        .route("/v1/users/:id/unsubscribe", post(unsubscribe))
        .route("/v1/users/:id/consume", post(consume_feeds))
        .route("/v1/counters", get(list_counters))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(rename = "startId")]
    start_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FeedQuery {
    #[serde(rename = "feedId")]
    feed_id: u64,
}

async fn list_feeds(State(state): State<AppState>) -> RestResult<Json<Vec<Feed>>> {
    Ok(Json(state.catalog.list_feeds()?))
}

async fn create_feed(State(state): State<AppState>) -> RestResult<Json<Feed>> {
    Ok(Json(state.catalog.create_feed()?))
}

async fn show_feed(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<PageQuery>,
) -> RestResult<Json<Feed>> {
    Ok(Json(state.catalog.feed_page(id, query.start_id)?))
}

async fn publish_article(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    text: String,
) -> RestResult<Json<Article>> {
    Ok(Json(state.catalog.publish_article(id, text)?))
}

async fn list_users(State(state): State<AppState>) -> RestResult<Json<Vec<User>>> {
    Ok(Json(state.ledger.list_users()?))
}

async fn create_user(State(state): State<AppState>) -> RestResult<Json<User>> {
    Ok(Json(state.ledger.create_user()?))
}

async fn show_user(State(state): State<AppState>, Path(id): Path<u64>) -> RestResult<Json<User>> {
    Ok(Json(state.ledger.get_user(id)?))
}

async fn subscribe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<FeedQuery>,
) -> RestResult<Json<User>> {
    Ok(Json(state.ledger.subscribe(id, query.feed_id)?))
}

async fn unsubscribe(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<FeedQuery>,
) -> RestResult<Json<User>> {
    Ok(Json(state.ledger.unsubscribe(id, query.feed_id)?))
}

async fn consume_feeds(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(start_ids): Json<BTreeMap<u64, u64>>,
) -> RestResult<Json<Vec<Feed>>> {
    Ok(Json(state.ledger.consume_feeds(id, start_ids)?))
}

async fn list_counters(State(state): State<AppState>) -> RestResult<Json<Vec<Counter>>> {
    let counters = state
        .counters
        .list_all()?
        .into_iter()
        .map(|(name, value)| Counter { name, value })
        .collect();

    Ok(Json(counters))
}
