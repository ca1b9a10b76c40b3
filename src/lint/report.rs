//! Finding accumulation, verdict and line rendering.

use std::fmt;

use serde::Serialize;

use super::diagnostic::{Finding, Severity};
use crate::cli::colors::{ColorSupport, severity_style, styled};

/// Outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Process exit code for this verdict.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }

    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Append-only sink for findings.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    findings: Vec<Finding>,
    errors: usize,
    warnings: usize,
    max_errors: Option<usize>,
    truncated: bool,
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max` errors. The first error past the limit is dropped
    /// and marks the report truncated.
    #[must_use]
    pub const fn with_max_errors(mut self, max: Option<usize>) -> Self {
        self.max_errors = max;
        self
    }

    /// Record a finding. Returns `false` once an error went past the limit;
    /// that error and every later finding are dropped.
    pub fn record(&mut self, finding: Finding) -> bool {
        if self.truncated {
            return false;
        }
        match finding.severity {
            Severity::Error if self.max_errors.is_some_and(|max| self.errors >= max) => {
                self.truncated = true;
                return false;
            }
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.findings.push(finding);
        true
    }

    /// Fail iff an error was seen, recorded or dropped at the limit.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.errors > 0 || self.truncated {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    /// All findings in evaluation order.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Get error findings
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    /// Get warning findings
    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// Filter findings by rule
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.rule_id == rule_id)
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors
    }

    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.findings.len()
    }

    /// Whether recording stopped at the error limit
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Render one finding as a report line, coloured by severity when the
    /// terminal supports it.
    #[must_use]
    pub fn render(finding: &Finding, support: ColorSupport) -> String {
        let label = styled(
            finding.severity.label(),
            |s| severity_style(finding.severity, s),
            support,
        );
        format!("{label}: {}", finding.detail())
    }

    /// Render every finding, in order.
    #[must_use]
    pub fn render_all(&self, support: ColorSupport) -> Vec<String> {
        self.findings
            .iter()
            .map(|finding| Self::render(finding, support))
            .collect()
    }
}
