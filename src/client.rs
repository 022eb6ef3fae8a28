// src/client.rs
//
// In-memory re-filtering over the last loaded snapshot, for interactive
// use without a round trip to the store. Deliberately a reduced surface
// compared to the server path: only remote and job_type filters, and a
// looser search (see DESIGN.md for the preserved divergences).

use crate::models::JobPosting;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilters {
    pub remote: Option<bool>,
    pub job_type: Option<String>,
}

/// Conjunctive equality filters; input order is preserved, never
/// re-sorted (the snapshot arrives server-sorted by posted_date).
pub fn apply_filters(jobs: &[JobPosting], filters: &ClientFilters) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|job| filters.remote.map_or(true, |r| job.remote == r))
        .filter(|job| {
            filters
                .job_type
                .as_ref()
                .map_or(true, |t| &job.job_type == t)
        })
        .cloned()
        .collect()
}

/// Local free-text search. A blank term is the identity, not an error
/// (unlike the server), and skills are matched by substring rather than
/// exact token. Each call works over the full snapshot; it does not
/// compose with a previously applied filter.
pub fn search(jobs: &[JobPosting], term: &str) -> Vec<JobPosting> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return jobs.to_vec();
    }

    jobs.iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&term)
                || job.company.to_lowercase().contains(&term)
                || job
                    .description
                    .as_ref()
                    .map_or(false, |d| d.to_lowercase().contains(&term))
                || job
                    .required_skills
                    .iter()
                    .any(|skill| skill.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn job(title: &str, remote: bool, job_type: &str, skills: &[&str]) -> JobPosting {
        JobPosting {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Baraka Tech".into(),
            description: None,
            location: "Kuala Lumpur".into(),
            remote,
            job_type: job_type.into(),
            salary_range: None,
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            source_url: None,
            posted_date: Utc::now(),
            is_active: true,
            halal_verified: false,
            no_riba: None,
            no_alcohol: None,
            no_gambling: None,
            no_haram_products: None,
            ethical_treatment: None,
            overall_score: None,
            verification_notes: None,
        }
    }

    fn fixture() -> Vec<JobPosting> {
        vec![
            job("Backend Engineer", true, "full-time", &["rust", "sql"]),
            job("Accountant", false, "part-time", &["excel"]),
            job("Data Analyst", true, "freelance", &["python"]),
        ]
    }

    #[test]
    fn remote_filter_keeps_only_remote_in_original_order() {
        let jobs = fixture();
        let out = apply_filters(
            &jobs,
            &ClientFilters {
                remote: Some(true),
                job_type: None,
            },
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Backend Engineer");
        assert_eq!(out[1].title, "Data Analyst");
    }

    #[test]
    fn filters_combine_conjunctively() {
        let jobs = fixture();
        let out = apply_filters(
            &jobs,
            &ClientFilters {
                remote: Some(true),
                job_type: Some("freelance".into()),
            },
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Data Analyst");
    }

    #[test]
    fn empty_filters_are_identity() {
        let jobs = fixture();
        assert_eq!(apply_filters(&jobs, &ClientFilters::default()), jobs);
    }

    #[test]
    fn blank_search_is_identity_not_an_error() {
        // the server rejects an empty term with 400; the local path
        // returns the snapshot unchanged, and that asymmetry is the
        // contract
        let jobs = fixture();
        assert_eq!(search(&jobs, ""), jobs);
        assert_eq!(search(&jobs, "   "), jobs);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let jobs = fixture();
        let out = search(&jobs, "ENGINEER");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Backend Engineer");
    }

    #[test]
    fn search_matches_skills_by_substring() {
        // unlike the server's exact-token skill match
        let jobs = fixture();
        let out = search(&jobs, "pyth");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Data Analyst");
    }

    #[test]
    fn missing_description_is_a_non_match() {
        let mut jobs = fixture();
        jobs[1].description = Some("ledger reconciliation".into());
        let out = search(&jobs, "ledger");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Accountant");
    }
}
