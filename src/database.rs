// src/database.rs

use std::time::Duration;

use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::models::{rate, JobFilters, JobPosting, Stats, TypeBuckets};
use crate::query::{Bind, ListQuery};

// Columns returned on listing and search rows; the detail fetch adds
// hv.verification_notes on top of these.
const LIST_SELECT: &str = "\
SELECT \
    j.id, j.title, j.company, j.description, j.location, j.remote, \
    j.job_type, j.salary_range, j.required_skills, j.source_url, \
    j.posted_date, j.is_active, j.halal_verified, \
    hv.no_riba, hv.no_alcohol, hv.no_gambling, hv.no_haram_products, \
    hv.ethical_treatment, hv.overall_score \
FROM jobs j \
LEFT JOIN halal_verification hv ON j.id = hv.job_id";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Lazy pool: connections are established on first use, so startup
    /// does not depend on the store being reachable.
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)?;
        Ok(Database { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    /// Connectivity probe used at startup and by nothing else.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Active postings matching the given filters, newest first.
    pub async fn list_jobs(&self, filters: &JobFilters) -> Result<Vec<JobPosting>, sqlx::Error> {
        let (sql, binds) = ListQuery::from_filters(filters).render(LIST_SELECT);
        bind_all(sqlx::query_as::<_, JobPosting>(&sql), binds)
            .fetch_all(&self.pool)
            .await
    }

    /// Single active posting with the full verification record, notes
    /// included. Returns None when no active row matches.
    pub async fn find_job(&self, id: Uuid) -> Result<Option<JobPosting>, sqlx::Error> {
        sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT j.id, j.title, j.company, j.description, j.location, j.remote,
                   j.job_type, j.salary_range, j.required_skills, j.source_url,
                   j.posted_date, j.is_active, j.halal_verified,
                   hv.no_riba, hv.no_alcohol, hv.no_gambling, hv.no_haram_products,
                   hv.ethical_treatment, hv.overall_score, hv.verification_notes
              FROM jobs j
              LEFT JOIN halal_verification hv ON j.id = hv.job_id
             WHERE j.id = $1 AND j.is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Free-text search: substring match on title, company and
    /// description, exact lower-cased token match on required_skills.
    pub async fn search_jobs(
        &self,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JobPosting>, sqlx::Error> {
        let sql = search_sql();
        sqlx::query_as::<_, JobPosting>(&sql)
            .bind(like_pattern(term))
            .bind(term.to_lowercase())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Snapshot of the platform counters, recomputed on every call.
    pub async fn get_stats(&self) -> Result<Stats, sqlx::Error> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS total_jobs,
                   COUNT(*) FILTER (WHERE halal_verified = TRUE) AS verified_jobs,
                   COUNT(*) FILTER (WHERE remote = TRUE) AS remote_jobs,
                   COUNT(DISTINCT company) AS total_companies,
                   COUNT(*) FILTER (WHERE job_type = 'full-time') AS fulltime_jobs,
                   COUNT(*) FILTER (WHERE job_type = 'part-time') AS parttime_jobs,
                   COUNT(*) FILTER (WHERE job_type = 'freelance') AS freelance_jobs
              FROM jobs
             WHERE is_active = TRUE
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Stats {
            total_jobs: row.total_jobs,
            verified_jobs: row.verified_jobs,
            verification_rate: rate(row.verified_jobs, row.total_jobs),
            remote_jobs: row.remote_jobs,
            remote_rate: rate(row.remote_jobs, row.total_jobs),
            total_companies: row.total_companies,
            by_type: TypeBuckets {
                fulltime: row.fulltime_jobs,
                parttime: row.parttime_jobs,
                freelance: row.freelance_jobs,
            },
        })
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_jobs: i64,
    verified_jobs: i64,
    remote_jobs: i64,
    total_companies: i64,
    fulltime_jobs: i64,
    parttime_jobs: i64,
    freelance_jobs: i64,
}

pub fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

// Free-text columns take the wildcard-wrapped term ($1); skills take the
// bare lower-cased term ($2) and match whole array elements only.
fn search_sql() -> String {
    format!(
        "{LIST_SELECT} \
         WHERE j.is_active = TRUE \
           AND (j.title ILIKE $1 OR j.company ILIKE $1 OR j.description ILIKE $1 \
                OR $2 = ANY(j.required_skills)) \
         ORDER BY j.posted_date DESC \
         LIMIT $3 OFFSET $4"
    )
}

fn bind_all<'q>(
    query: sqlx::query::QueryAs<'q, Postgres, JobPosting, PgArguments>,
    binds: Vec<Bind>,
) -> sqlx::query::QueryAs<'q, Postgres, JobPosting, PgArguments> {
    binds.into_iter().fold(query, |q, bind| match bind {
        Bind::Text(v) => q.bind(v),
        Bind::Bool(v) => q.bind(v),
        Bind::Int(v) => q.bind(v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_in_wildcards() {
        assert_eq!(like_pattern("engineer"), "%engineer%");
    }

    #[test]
    fn search_matches_skills_as_exact_tokens() {
        let sql = search_sql();
        // free-text columns are substring, skills are whole-token on a
        // separate bind that never gets wildcards
        assert!(sql.contains("j.title ILIKE $1"));
        assert!(sql.contains("j.company ILIKE $1"));
        assert!(sql.contains("j.description ILIKE $1"));
        assert!(sql.contains("$2 = ANY(j.required_skills)"));
        assert!(sql.contains("WHERE j.is_active = TRUE"));
        assert!(sql.contains("ORDER BY j.posted_date DESC"));
    }

    #[test]
    fn list_select_excludes_verification_notes() {
        // property 8: the detail fetch is a strict superset of the
        // listing columns
        assert!(!LIST_SELECT.contains("verification_notes"));
        assert!(LIST_SELECT.contains("hv.overall_score"));
    }
}
