//! The finished run, ready for rendering.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use omnicheck_application::RunContext;
use omnicheck_domain::TestResult;
use omnicheck_domain::auth::AuthMode;
use omnicheck_domain::report::{
    Category, CategoryStats, Guidance, RunSummary, Verdict, next_steps,
};
use serde::Serialize;
use uuid::Uuid;

/// Everything a renderer needs about one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique, time-ordered run identifier
    pub run_id: Uuid,
    /// When the first request was issued
    pub started_at: DateTime<Utc>,
    /// Base URL the catalogue ran against
    pub base_url: String,
    /// Which credentials were supplied
    pub auth_mode: AuthMode,
    /// Results in catalogue order
    pub results: Vec<TestResult>,
    /// Per-category counters, in report order
    pub categories: BTreeMap<Category, CategoryStats>,
    /// Run-wide counters and coverage
    pub summary: RunSummary,
    /// Closing verdict
    pub verdict: Verdict,
    /// Whether any failure is not a 401/403; drives the exit code
    pub has_non_auth_failures: bool,
    /// Advice for the credentials that were missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Guidance>,
}

impl RunReport {
    /// Builds the report from a completed run.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        context: RunContext,
        known_total: usize,
    ) -> Self {
        let aggregate = context.aggregate(known_total);
        let has_non_auth_failures = context.has_non_auth_failures();

        Self {
            run_id: Uuid::now_v7(),
            started_at,
            base_url: base_url.into(),
            auth_mode: context.mode,
            verdict: aggregate.summary.verdict(),
            categories: aggregate.categories,
            summary: aggregate.summary,
            has_non_auth_failures,
            next_steps: next_steps(context.mode),
            results: context.results,
        }
    }
}
