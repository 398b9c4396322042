//! Text rendering of a run report.

use std::fmt;

use omnicheck_domain::TestResult;
use omnicheck_domain::report::Verdict;

use crate::report::RunReport;

const RULE_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 120;

/// Plain-text report, written through `Display`.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    report: &'a RunReport,
    verbose: bool,
}

impl<'a> TextReport<'a> {
    /// Wraps a report; `verbose` adds a response preview per result.
    #[must_use]
    pub const fn new(report: &'a RunReport, verbose: bool) -> Self {
        Self { report, verbose }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.report.summary;
        writeln!(f, "OmniChat API Validator")?;
        writeln!(
            f,
            "Testing {} of {} known endpoints",
            summary.total, summary.coverage.known_total
        )?;
        writeln!(f, "{}", "─".repeat(RULE_WIDTH))?;
        writeln!(f)?;
        writeln!(f, "Validating OmniChat API at {}", self.report.base_url)?;
        let auth = self.report.auth_mode.description();
        writeln!(f, "Authentication: {auth}")?;
        writeln!(f)
    }

    fn write_result(&self, f: &mut fmt::Formatter<'_>, result: &TestResult) -> fmt::Result {
        let mark = if result.success { "PASS" } else { "FAIL" };
        let status = if result.status_code == 0 {
            "no response".to_string()
        } else {
            result.status_code.to_string()
        };
        writeln!(
            f,
            "  {mark}  {} ({status}, {}ms)",
            result.name,
            result.duration.as_millis()
        )?;

        if let Some(error) = &result.error {
            for line in error.lines() {
                writeln!(f, "        {line}")?;
            }
        }
        if let Some(note) = &result.note {
            writeln!(f, "        {note}")?;
        }
        if self.verbose
            && let Some(body) = &result.response
        {
            writeln!(f, "        Response: {}", body.preview(PREVIEW_CHARS))?;
        }
        Ok(())
    }

    fn write_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let summary = &report.summary;

        writeln!(f)?;
        writeln!(f, "Test Summary:")?;
        writeln!(f)?;
        writeln!(f, "By Category:")?;
        for (category, stats) in &report.categories {
            write!(
                f,
                "  {:<20} Total: {:2} | Passed: {} | Failed: {}",
                category.label(),
                stats.total,
                stats.passed,
                stats.failed
            )?;
            if stats.auth_required > 0 {
                write!(f, " | Auth Required: {}", stats.auth_required)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Overall: Total: {} | Passed: {} | Failed: {} | Auth Required: {}",
            summary.total, summary.passed, summary.failed, summary.auth_required
        )?;
        writeln!(
            f,
            "Endpoint Coverage: {}/{} ({:.1}%)",
            summary.coverage.exercised,
            summary.coverage.known_total,
            summary.coverage.percent()
        )?;

        if let Some(guidance) = &report.next_steps {
            writeln!(f)?;
            writeln!(f, "{}", guidance.heading)?;
            for (i, step) in guidance.steps.iter().enumerate() {
                writeln!(f, "   {}. {step}", i + 1)?;
            }
        }

        match report.verdict {
            Verdict::FailuresBeyondAuth => {
                writeln!(f)?;
                writeln!(
                    f,
                    "Some tests failed beyond auth issues. Review errors above."
                )
            }
            Verdict::AllPassed => {
                writeln!(f)?;
                writeln!(f, "All accessible tests passed!")
            }
            Verdict::AuthRequiredOnly => Ok(()),
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        writeln!(f, "Results:")?;
        for result in &self.report.results {
            self.write_result(f, result)?;
        }
        self.write_summary(f)
    }
}
