// src/handlers.rs

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;
use warp::{Rejection, Reply};

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{
    parse_or, HealthResponse, JobDetail, JobFilters, JobResponse, JobsResponse, SearchResponse,
    StatsResponse, DEFAULT_LIMIT,
};

pub async fn health_handler() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "ok",
        message: "Rizq API is running",
        timestamp: Utc::now().to_rfc3339(),
    }))
}

pub async fn list_handler(
    params: HashMap<String, String>,
    db: Database,
) -> Result<impl Reply, Rejection> {
    let filters = JobFilters::from_query(&params);
    let jobs = db
        .list_jobs(&filters)
        .await
        .map_err(ApiError::db("Failed to fetch jobs"))?;

    Ok(warp::reply::json(&JobsResponse {
        success: true,
        count: jobs.len(),
        jobs,
    }))
}

/// The route only matches well-formed Uuid segments; anything else falls
/// through to the 404 fallback, so id shape never surfaces as a 500.
pub async fn get_handler(id: Uuid, db: Database) -> Result<impl Reply, Rejection> {
    let job = db
        .find_job(id)
        .await
        .map_err(ApiError::db("Failed to fetch job"))?
        .ok_or(ApiError::JobNotFound)?;

    Ok(warp::reply::json(&JobResponse {
        success: true,
        job: JobDetail::from(job),
    }))
}

pub async fn search_handler(
    params: HashMap<String, String>,
    db: Database,
) -> Result<impl Reply, Rejection> {
    let term = params
        .get("q")
        .map(String::as_str)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;
    let limit = parse_or(params.get("limit"), DEFAULT_LIMIT);
    let offset = parse_or(params.get("offset"), 0);

    let jobs = db
        .search_jobs(term, limit, offset)
        .await
        .map_err(ApiError::db("Failed to search jobs"))?;

    Ok(warp::reply::json(&SearchResponse {
        success: true,
        count: jobs.len(),
        query: term.to_string(),
        jobs,
    }))
}

pub async fn stats_handler(db: Database) -> Result<impl Reply, Rejection> {
    let stats = db
        .get_stats()
        .await
        .map_err(ApiError::db("Failed to fetch statistics"))?;

    Ok(warp::reply::json(&StatsResponse {
        success: true,
        stats,
    }))
}
