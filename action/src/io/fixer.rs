//! Fixer abstraction for single-document remediation.
//!
//! The [`Fixer`] trait decouples batch orchestration from the actual fixer
//! backend (currently the `demarkx` CLI). Tests use scripted fixers that
//! return predetermined outcomes without spawning processes.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use jsonschema::{Draft, Validator};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::core::exit_status::classify_fixer_exit;
use crate::core::types::{FixOutcome, IssueRecord, Tier};
use crate::io::process::{Invocation, invoke};

const FIX_REPORT_SCHEMA: &str = include_str!("../../schemas/fix_report.schema.json");

/// Parameters for one fixer invocation.
#[derive(Debug, Clone)]
pub struct FixRequest {
    /// Working directory; `path` is resolved against it.
    pub workdir: PathBuf,
    /// Document to inspect, relative to `workdir`.
    pub path: PathBuf,
    /// Maximum time to wait for the fixer.
    pub timeout: Duration,
    /// Truncate captured fixer output beyond this many bytes.
    pub output_limit_bytes: usize,
}

/// Abstraction over single-document fixers.
///
/// An `Err` means the document could not be assessed (the fixer failed or
/// its output could not be decoded); the caller skips the document.
pub trait Fixer {
    fn fix(&self, request: &FixRequest) -> Result<FixOutcome>;
}

/// Fixer that spawns `<command...> fix <path> --json`.
pub struct CommandFixer {
    command: Vec<String>,
    report_schema: Validator,
}

impl CommandFixer {
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            bail!("fixer command must not be empty");
        }
        Ok(Self {
            command,
            report_schema: compile_report_schema()?,
        })
    }
}

impl Fixer for CommandFixer {
    #[instrument(skip_all, fields(path = %request.path.display()))]
    fn fix(&self, request: &FixRequest) -> Result<FixOutcome> {
        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..])
            .arg("fix")
            .arg(&request.path)
            .arg("--json")
            .current_dir(&request.workdir);

        let invocation = invoke(cmd, request.timeout, request.output_limit_bytes)
            .with_context(|| format!("run fixer `{}`", self.command.join(" ")))?;
        let (code, stdout, stderr) = match invocation {
            Invocation::NotStarted(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("start fixer `{}`", self.command.join(" "))));
            }
            Invocation::TimedOut { deadline } => bail!("fixer timed out after {deadline:?}"),
            Invocation::Exited {
                code,
                stdout,
                stderr,
            } => (code, stdout, stderr),
        };

        let exit = classify_fixer_exit(code);
        if !exit.is_success() {
            warn!(exit_code = ?code, "fixer failed");
            bail!("fixer exited with status {code:?}: {}", stderr.text());
        }
        if stdout.overflowed() {
            bail!(
                "fixer output exceeded {} bytes",
                request.output_limit_bytes
            );
        }

        let outcome = decode_fix_report(&self.report_schema, &stdout.kept)?;
        debug!(
            ?exit,
            safe = outcome.safe_fixes.len(),
            inferred = outcome.inferred_fixes.len(),
            lint = outcome.lint_issues.len(),
            "fixer report decoded"
        );
        Ok(outcome)
    }
}

pub fn compile_report_schema() -> Result<Validator> {
    let schema: Value =
        serde_json::from_str(FIX_REPORT_SCHEMA).context("parse fix report schema")?;
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile fix report schema")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixReportPayload {
    fix_report: WireFixReport,
    #[serde(default)]
    fixed_markdown: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFixReport {
    safe_fixes: Vec<WireIssue>,
    inferred_fixes: Vec<WireIssue>,
    lint_issues: Vec<WireIssue>,
}

/// Issue object as emitted by the fixer; fields beyond `message` are ignored.
#[derive(Debug, Deserialize)]
struct WireIssue {
    message: String,
}

/// Decode fixer stdout into a [`FixOutcome`].
///
/// The payload must be JSON conforming to the bundled schema, and must carry
/// `fixedMarkdown` whenever it reports safe fixes.
pub fn decode_fix_report(schema: &Validator, stdout: &[u8]) -> Result<FixOutcome> {
    let value: Value = serde_json::from_slice(stdout).context("parse fixer output as json")?;
    let messages: Vec<String> = schema
        .iter_errors(&value)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!(
            "fixer output does not match report schema:\n- {}",
            messages.join("\n- ")
        );
    }
    let payload: FixReportPayload =
        serde_json::from_value(value).context("decode fixer report")?;

    let report = payload.fix_report;
    if !report.safe_fixes.is_empty() && payload.fixed_markdown.is_none() {
        bail!("fixer reported safe fixes without fixedMarkdown");
    }
    Ok(FixOutcome {
        safe_fixes: into_records(report.safe_fixes, Tier::SafeFix),
        inferred_fixes: into_records(report.inferred_fixes, Tier::InferredFix),
        lint_issues: into_records(report.lint_issues, Tier::LintIssue),
        corrected_content: payload.fixed_markdown,
    })
}

fn into_records(issues: Vec<WireIssue>, tier: Tier) -> Vec<IssueRecord> {
    issues
        .into_iter()
        .map(|issue| IssueRecord::new(issue.message, tier))
        .collect()
}
