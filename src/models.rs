// src/models.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting, with its halal verification record flattened alongside
/// via LEFT JOIN. Verification fields are null when no record exists.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub location: String,
    pub remote: bool,
    // full-time | part-time | freelance | other
    pub job_type: String,
    pub salary_range: Option<String>,
    pub required_skills: Vec<String>,
    pub source_url: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub is_active: bool,
    pub halal_verified: bool,

    // --- joined from halal_verification ---
    pub no_riba: Option<bool>,
    pub no_alcohol: Option<bool>,
    pub no_gambling: Option<bool>,
    pub no_haram_products: Option<bool>,
    pub ethical_treatment: Option<bool>,
    pub overall_score: Option<i32>,
    // Only selected by the single-job fetch; listing and search rows
    // decode without the column and omit the key in JSON.
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
}

/// Detail-fetch shape: same row, but `verification_notes` is always
/// present in the JSON, rendering as null when the record carries none.
#[derive(Debug, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: JobPosting,
    pub verification_notes: Option<String>,
}

impl From<JobPosting> for JobDetail {
    fn from(mut job: JobPosting) -> Self {
        let verification_notes = job.verification_notes.take();
        JobDetail {
            job,
            verification_notes,
        }
    }
}

pub const DEFAULT_LIMIT: i64 = 20;

/// Optional listing filters, decoded from the query string. Everything
/// unspecified is a no-op; filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub job_type: Option<String>,
    pub halal: bool,
    pub limit: i64,
    pub offset: i64,
}

impl JobFilters {
    /// Coercion rules mirror the HTTP contract: `remote` compares the raw
    /// value against "true", `halal` only restricts when exactly "true",
    /// and non-numeric limit/offset fall back to the defaults.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        JobFilters {
            location: params.get("location").cloned().filter(|s| !s.is_empty()),
            remote: params.get("remote").map(|s| s == "true"),
            job_type: params.get("type").cloned().filter(|s| !s.is_empty()),
            halal: params.get("halal").map(|s| s == "true").unwrap_or(false),
            limit: parse_or(params.get("limit"), DEFAULT_LIMIT),
            offset: parse_or(params.get("offset"), 0),
        }
    }
}

pub fn parse_or(value: Option<&String>, default: i64) -> i64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Aggregate counters over active postings, computed fresh on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_jobs: i64,
    pub verified_jobs: i64,
    pub verification_rate: i64,
    pub remote_jobs: i64,
    pub remote_rate: i64,
    pub total_companies: i64,
    pub by_type: TypeBuckets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeBuckets {
    pub fulltime: i64,
    pub parttime: i64,
    pub freelance: i64,
}

/// Percentage of `part` in `total`, rounded; 0 when total is 0.
pub fn rate(part: i64, total: i64) -> i64 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as i64
    }
}

// ==================== Wire envelopes ====================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: JobDetail,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub count: usize,
    pub query: String,
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: Stats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
