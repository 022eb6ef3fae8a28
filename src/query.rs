// src/query.rs
//
// Structured predicate builder for the job listing query. Filters are
// collected as an ordered clause list and only rendered into SQL with
// `$n` placeholders at the end, so parameter indices can never drift
// out of step with the bind list.

use crate::models::JobFilters;

/// A value bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Text(String),
    Bool(bool),
    Int(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Eq,
    ILike,
}

impl Op {
    fn sql(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::ILike => "ILIKE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub column: &'static str,
    pub op: Op,
    pub value: Bind,
}

/// A listing query: optional conjunctive clauses on top of the fixed
/// `is_active` base predicate, ordered newest-first, paginated.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    clauses: Vec<Clause>,
    limit: i64,
    offset: i64,
}

impl ListQuery {
    pub fn from_filters(filters: &JobFilters) -> Self {
        let mut clauses = Vec::new();
        if let Some(location) = &filters.location {
            clauses.push(Clause {
                column: "j.location",
                op: Op::ILike,
                value: Bind::Text(format!("%{location}%")),
            });
        }
        if let Some(remote) = filters.remote {
            clauses.push(Clause {
                column: "j.remote",
                op: Op::Eq,
                value: Bind::Bool(remote),
            });
        }
        if let Some(job_type) = &filters.job_type {
            clauses.push(Clause {
                column: "j.job_type",
                op: Op::Eq,
                value: Bind::Text(job_type.clone()),
            });
        }
        // halal=false is not a negative filter; only true restricts
        if filters.halal {
            clauses.push(Clause {
                column: "j.halal_verified",
                op: Op::Eq,
                value: Bind::Bool(true),
            });
        }
        ListQuery {
            clauses,
            limit: filters.limit,
            offset: filters.offset,
        }
    }

    /// Render into a parameterized statement plus its bind list, in
    /// placeholder order. `select` is the SELECT ... FROM ... prefix.
    pub fn render(&self, select: &str) -> (String, Vec<Bind>) {
        let mut sql = format!("{select} WHERE j.is_active = TRUE");
        let mut binds = Vec::with_capacity(self.clauses.len() + 2);

        for clause in &self.clauses {
            sql.push_str(&format!(
                " AND {} {} ${}",
                clause.column,
                clause.op.sql(),
                binds.len() + 1
            ));
            binds.push(clause.value.clone());
        }

        sql.push_str(" ORDER BY j.posted_date DESC");
        sql.push_str(&format!(" LIMIT ${} OFFSET ${}", binds.len() + 1, binds.len() + 2));
        binds.push(Bind::Int(self.limit));
        binds.push(Bind::Int(self.offset));

        (sql, binds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_LIMIT;

    fn filters() -> JobFilters {
        JobFilters {
            limit: DEFAULT_LIMIT,
            ..JobFilters::default()
        }
    }

    #[test]
    fn base_predicate_always_applied() {
        // with no filters at all
        let (sql, binds) = ListQuery::from_filters(&filters()).render("SELECT * FROM jobs j");
        assert!(sql.contains("WHERE j.is_active = TRUE"));
        assert_eq!(binds, vec![Bind::Int(20), Bind::Int(0)]);

        // and with every filter set
        let all = JobFilters {
            location: Some("Jakarta".into()),
            remote: Some(true),
            job_type: Some("full-time".into()),
            halal: true,
            limit: 10,
            offset: 5,
        };
        let (sql, _) = ListQuery::from_filters(&all).render("SELECT * FROM jobs j");
        assert!(sql.contains("WHERE j.is_active = TRUE"));
    }

    #[test]
    fn ordering_is_posted_date_desc() {
        let (sql, _) = ListQuery::from_filters(&filters()).render("SELECT * FROM jobs j");
        assert!(sql.contains("ORDER BY j.posted_date DESC"));
    }

    #[test]
    fn location_renders_as_wildcard_ilike() {
        let f = JobFilters {
            location: Some("Jakarta".into()),
            ..filters()
        };
        let (sql, binds) = ListQuery::from_filters(&f).render("SELECT * FROM jobs j");
        assert!(sql.contains("AND j.location ILIKE $1"));
        assert_eq!(binds[0], Bind::Text("%Jakarta%".into()));
    }

    #[test]
    fn halal_true_adds_clause_absent_does_not() {
        let f = JobFilters {
            halal: true,
            ..filters()
        };
        let (sql, binds) = ListQuery::from_filters(&f).render("SELECT * FROM jobs j");
        assert!(sql.contains("AND j.halal_verified = $1"));
        assert_eq!(binds[0], Bind::Bool(true));

        let (sql, _) = ListQuery::from_filters(&filters()).render("SELECT * FROM jobs j");
        assert!(!sql.contains("halal_verified"));
    }

    #[test]
    fn placeholder_indices_follow_clause_order() {
        let f = JobFilters {
            location: Some("Lagos".into()),
            remote: Some(false),
            job_type: Some("freelance".into()),
            halal: true,
            limit: 50,
            offset: 100,
        };
        let (sql, binds) = ListQuery::from_filters(&f).render("SELECT * FROM jobs j");
        assert!(sql.contains("j.location ILIKE $1"));
        assert!(sql.contains("j.remote = $2"));
        assert!(sql.contains("j.job_type = $3"));
        assert!(sql.contains("j.halal_verified = $4"));
        assert!(sql.ends_with("LIMIT $5 OFFSET $6"));
        assert_eq!(
            binds,
            vec![
                Bind::Text("%Lagos%".into()),
                Bind::Bool(false),
                Bind::Text("freelance".into()),
                Bind::Bool(true),
                Bind::Int(50),
                Bind::Int(100),
            ]
        );
    }

    #[test]
    fn filters_are_conjunctive_only() {
        let f = JobFilters {
            remote: Some(true),
            job_type: Some("part-time".into()),
            ..filters()
        };
        let (sql, _) = ListQuery::from_filters(&f).render("SELECT * FROM jobs j");
        assert!(!sql.contains(" OR "));
    }
}
