//! Batch-wide accumulation of fixer outcomes.

use std::path::PathBuf;

use crate::core::types::{FileReport, FixOutcome, IssueRecord};

/// Everything the run has learned so far, in document processing order.
///
/// Created empty once per run and only ever appended to. The three tallies
/// hold every record of every recorded file; `files` holds the files that had
/// at least one finding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchState {
    pub safe_fixes: Vec<IssueRecord>,
    pub inferred_fixes: Vec<IssueRecord>,
    pub lint_issues: Vec<IssueRecord>,
    pub files: Vec<FileReport>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one decoded outcome into the batch.
    ///
    /// Clean outcomes are dropped. Returns whether the outcome was recorded.
    pub fn record(&mut self, path: PathBuf, outcome: FixOutcome) -> bool {
        if !outcome.has_issues() {
            return false;
        }
        self.safe_fixes.extend(outcome.safe_fixes.iter().cloned());
        self.inferred_fixes
            .extend(outcome.inferred_fixes.iter().cloned());
        self.lint_issues.extend(outcome.lint_issues.iter().cloned());
        self.files.push(FileReport { path, outcome });
        true
    }

    pub fn total_issues(&self) -> usize {
        self.safe_fixes.len() + self.inferred_fixes.len() + self.lint_issues.len()
    }

    /// All records in report order: safe, then inferred, then lint.
    pub fn all_issues(&self) -> impl Iterator<Item = &IssueRecord> {
        self.safe_fixes
            .iter()
            .chain(&self.inferred_fixes)
            .chain(&self.lint_issues)
    }

    pub fn has_findings(&self) -> bool {
        !self.files.is_empty()
    }
}
