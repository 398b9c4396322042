//! Aggregation of test results into category and run statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::{Category, classify};
use crate::auth::AuthMode;
use crate::testing::TestResult;

/// Counters for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Results in the category
    pub total: usize,
    /// Successful results
    pub passed: usize,
    /// Failed results
    pub failed: usize,
    /// Failed results with status 401/403
    pub auth_required: usize,
}

impl CategoryStats {
    fn record(&mut self, result: &TestResult) {
        self.total += 1;
        if result.success {
            self.passed += 1;
        } else {
            self.failed += 1;
            if result.is_auth_failure() {
                self.auth_required += 1;
            }
        }
    }
}

/// Endpoints exercised against the size of the full API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    /// Endpoints exercised in this run
    pub exercised: usize,
    /// Endpoints the API exposes
    pub known_total: usize,
}

impl Coverage {
    /// Exercised fraction in `[0, 1]`; 0 when the known total is 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self) -> f64 {
        if self.known_total == 0 {
            0.0
        } else {
            self.exercised as f64 / self.known_total as f64
        }
    }

    /// Exercised share as a percentage.
    #[must_use]
    pub fn percent(self) -> f64 {
        self.ratio() * 100.0
    }
}

/// Closing verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// At least one failure is not a 401/403.
    FailuresBeyondAuth,
    /// Every result passed.
    AllPassed,
    /// Only 401/403 failures.
    AuthRequiredOnly,
}

/// Run-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Results in the run
    pub total: usize,
    /// Successful results
    pub passed: usize,
    /// Failed results
    pub failed: usize,
    /// Failed results with status 401/403
    pub auth_required: usize,
    /// Coverage against the full API
    pub coverage: Coverage,
}

impl RunSummary {
    /// Verdict derived from the counters.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.failed > self.auth_required {
            Verdict::FailuresBeyondAuth
        } else if self.passed == self.total {
            Verdict::AllPassed
        } else {
            Verdict::AuthRequiredOnly
        }
    }
}

/// Statistics derived from a run's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Per-category counters, in report order
    pub categories: BTreeMap<Category, CategoryStats>,
    /// Run-wide counters
    pub summary: RunSummary,
}

/// Builds category and run statistics without touching the results.
#[must_use]
pub fn aggregate(results: &[TestResult], known_total: usize) -> Aggregate {
    let mut categories: BTreeMap<Category, CategoryStats> = BTreeMap::new();
    let mut overall = CategoryStats::default();

    for result in results {
        categories
            .entry(classify(&result.name))
            .or_default()
            .record(result);
        overall.record(result);
    }

    Aggregate {
        categories,
        summary: RunSummary {
            total: overall.total,
            passed: overall.passed,
            failed: overall.failed,
            auth_required: overall.auth_required,
            coverage: Coverage {
                exercised: overall.total,
                known_total,
            },
        },
    }
}

/// Returns true if any result failed for a reason other than 401/403.
///
/// Drives the process exit code.
#[must_use]
pub fn has_non_auth_failures(results: &[TestResult]) -> bool {
    results.iter().any(TestResult::is_non_auth_failure)
}

/// Advice for obtaining the credentials a run was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    /// Heading line
    pub heading: String,
    /// Numbered steps
    pub steps: Vec<String>,
}

/// Next steps for the given auth mode; `None` when both tokens were supplied.
#[must_use]
pub fn next_steps(mode: AuthMode) -> Option<Guidance> {
    const CLERK_STEP: &str = "Get a Clerk token from the web app session";
    const JWT_STEP: &str = "Get a JWT token via: POST /api/v1/auth/apple";

    let (heading, steps) = match mode {
        AuthMode::Both => return None,
        AuthMode::None => (
            "To test authenticated endpoints:",
            vec![
                CLERK_STEP,
                JWT_STEP,
                "Run: omnicheck --clerk CLERK_TOKEN --bearer JWT_TOKEN",
            ],
        ),
        AuthMode::ClerkOnly => (
            "To test V1 API endpoints:",
            vec![JWT_STEP, "Run: omnicheck --bearer JWT_TOKEN"],
        ),
        AuthMode::JwtOnly => (
            "To test web app endpoints:",
            vec![CLERK_STEP, "Run: omnicheck --clerk CLERK_TOKEN"],
        ),
    };
    Some(Guidance {
        heading: heading.to_string(),
        steps: steps.into_iter().map(str::to_string).collect(),
    })
}
