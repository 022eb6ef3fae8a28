// src/error.rs

use std::convert::Infallible;

use thiserror::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::models::ErrorResponse;

/// Everything a request can fail with. Store errors are logged with
/// detail server-side and collapse to a fixed per-endpoint message on
/// the wire.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Search query required")]
    MissingQuery,

    #[error("Job not found")]
    JobNotFound,

    #[error("{context}")]
    Database {
        context: &'static str,
        source: sqlx::Error,
    },
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    /// `?`-friendly adapter: `.map_err(ApiError::db("Failed to fetch jobs"))`.
    pub fn db(context: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Database { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingQuery => StatusCode::BAD_REQUEST,
            ApiError::JobNotFound => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders every rejection as the JSON error envelope. Unmatched routes
/// fall through warp as `not_found` and become the 404 fallback.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_err) = err.find::<ApiError>() {
        if let ApiError::Database { source, .. } = api_err {
            tracing::error!(error = %source, "database request failed");
        }
        (api_err.status(), api_err.to_string())
    } else if err.is_not_found() || err.find::<warp::reject::MethodNotAllowed>().is_some() {
        // the surface is GET-only, so a wrong method is just an
        // unmatched endpoint
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else {
        tracing::error!(?err, "unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    let body = warp::reply::json(&ErrorResponse {
        success: false,
        error: message,
    });
    Ok(warp::reply::with_status(body, status))
}
