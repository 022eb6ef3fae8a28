// src/lib.rs

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;

use std::collections::HashMap;
use std::convert::Infallible;

use uuid::Uuid;
use warp::{Filter, Reply};

use database::Database;

/// The full read-only API surface, with every rejection already
/// recovered into the JSON error envelope. The id segment is typed as a
/// Uuid, so "search" (or any other non-id path) can never fall through
/// into the single-job route and shadow its own rejection.
pub fn routes(db: Database) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::get()
        .and(warp::path!("api" / "health"))
        .and_then(handlers::health_handler);

    let search = warp::get()
        .and(warp::path!("api" / "jobs" / "search"))
        .and(warp::query::<HashMap<String, String>>())
        .and(with_db(db.clone()))
        .and_then(handlers::search_handler);

    let list = warp::get()
        .and(warp::path!("api" / "jobs"))
        .and(warp::query::<HashMap<String, String>>())
        .and(with_db(db.clone()))
        .and_then(handlers::list_handler);

    let get = warp::get()
        .and(warp::path!("api" / "jobs" / Uuid))
        .and(with_db(db.clone()))
        .and_then(handlers::get_handler);

    let stats = warp::get()
        .and(warp::path!("api" / "stats"))
        .and(with_db(db))
        .and_then(handlers::stats_handler);

    health
        .or(search)
        .or(list)
        .or(get)
        .or(stats)
        .recover(error::handle_rejection)
}

fn with_db(db: Database) -> impl Filter<Extract = (Database,), Error = Infallible> + Clone {
    warp::any().map(move || db.clone())
}
