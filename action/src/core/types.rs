//! Shared deterministic types for the batch core.
//!
//! These types carry fixer findings from the port into aggregation, rendering
//! and the verdict. They hold no I/O handles and compare by value so tests can
//! assert on whole structures.

use std::path::PathBuf;

/// Confidence tier the fixer assigned to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Corrected automatically without review.
    SafeFix,
    /// Correction suggested, needs human approval.
    InferredFix,
    /// No automated correction available.
    LintIssue,
}

/// A single finding reported by the fixer. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub message: String,
    pub tier: Tier,
}

impl IssueRecord {
    pub fn new(message: impl Into<String>, tier: Tier) -> Self {
        Self {
            message: message.into(),
            tier,
        }
    }
}

/// Decoded result of one fixer invocation.
///
/// `corrected_content` is the full document with safe fixes applied. It is
/// only present (and only meaningful) when `safe_fixes` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixOutcome {
    pub safe_fixes: Vec<IssueRecord>,
    pub inferred_fixes: Vec<IssueRecord>,
    pub lint_issues: Vec<IssueRecord>,
    pub corrected_content: Option<String>,
}

impl FixOutcome {
    /// True when any tier carries at least one record.
    pub fn has_issues(&self) -> bool {
        !self.safe_fixes.is_empty()
            || !self.inferred_fixes.is_empty()
            || !self.lint_issues.is_empty()
    }

    /// Corrected text to write back, if the outcome carries safe fixes.
    pub fn safe_rewrite(&self) -> Option<&str> {
        if self.safe_fixes.is_empty() {
            return None;
        }
        self.corrected_content.as_deref()
    }
}

/// A document with at least one finding, kept in processing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FixOutcome,
}

/// Pass/fail decision for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}
