//! Test-only helpers: outcome builders, scripted fixer, recording publisher.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::types::{FixOutcome, IssueRecord, Tier};
use crate::io::context::CommentTarget;
use crate::io::fixer::{FixRequest, Fixer};
use crate::io::publisher::Publisher;

/// Build an outcome from message lists.
///
/// Outcomes with safe fixes get `corrected_content = "fixed\n"`.
pub fn outcome(safe: &[&str], inferred: &[&str], lint: &[&str]) -> FixOutcome {
    let records = |messages: &[&str], tier: Tier| -> Vec<IssueRecord> {
        messages
            .iter()
            .map(|message| IssueRecord::new(*message, tier))
            .collect()
    };
    FixOutcome {
        safe_fixes: records(safe, Tier::SafeFix),
        inferred_fixes: records(inferred, Tier::InferredFix),
        lint_issues: records(lint, Tier::LintIssue),
        corrected_content: (!safe.is_empty()).then(|| "fixed\n".to_string()),
    }
}

/// Scripted response for one document.
#[derive(Debug, Clone)]
pub enum ScriptedFix {
    Outcome(FixOutcome),
    Fail(String),
}

/// Fixer that answers from a per-path script and records call order.
///
/// Paths without a script entry are treated as clean.
#[derive(Debug, Default)]
pub struct ScriptedFixer {
    script: HashMap<PathBuf, ScriptedFix>,
    calls: RefCell<Vec<PathBuf>>,
}

impl ScriptedFixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, path: &str, outcome: FixOutcome) -> Self {
        self.script
            .insert(PathBuf::from(path), ScriptedFix::Outcome(outcome));
        self
    }

    pub fn with_failure(mut self, path: &str, message: &str) -> Self {
        self.script
            .insert(PathBuf::from(path), ScriptedFix::Fail(message.to_string()));
        self
    }

    /// Paths passed to `fix`, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl Fixer for ScriptedFixer {
    fn fix(&self, request: &FixRequest) -> Result<FixOutcome> {
        self.calls.borrow_mut().push(request.path.clone());
        match self.script.get(&request.path) {
            Some(ScriptedFix::Outcome(outcome)) => Ok(outcome.clone()),
            Some(ScriptedFix::Fail(message)) => Err(anyhow!(message.clone())),
            None => Ok(FixOutcome::default()),
        }
    }
}

/// Publisher that records every comment instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    calls: RefCell<Vec<(CommentTarget, String)>>,
    failure: Option<String>,
}

impl RecordingPublisher {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: RefCell::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<(CommentTarget, String)> {
        self.calls.borrow().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn create_comment(&self, target: &CommentTarget, body: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((target.clone(), body.to_string()));
        match &self.failure {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

/// Temporary workspace with Markdown documents.
pub struct TestRepo {
    temp: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp repo")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_doc(&self, relative: &str, contents: &str) -> Result<()> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn read_doc(&self, relative: &str) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
