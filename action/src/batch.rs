//! Orchestration for one batch run over the repository.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

use crate::core::batch_state::BatchState;
use crate::core::report::render_report;
use crate::core::types::Verdict;
use crate::core::verdict::decide;
use crate::io::apply::apply_safe_fixes;
use crate::io::config::ActionConfig;
use crate::io::context::TriggerContext;
use crate::io::discovery::discover;
use crate::io::fixer::{FixRequest, Fixer};
use crate::io::publisher::Publisher;

/// Result of a completed batch run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Documents found before the `max_files` cap.
    pub found: usize,
    /// Documents handed to the fixer, in processing order.
    pub processed: Vec<PathBuf>,
    /// Documents skipped because the fixer failed or its output was unusable.
    /// A document whose safe-fix write failed is still counted, not skipped.
    pub skipped: Vec<PathBuf>,
    /// Aggregated findings.
    pub state: BatchState,
    /// Rendered summary body.
    pub report: String,
    /// Whether the summary was posted as a review comment.
    pub published: bool,
    pub verdict: Verdict,
}

/// Run the whole pipeline once.
///
/// Documents are processed strictly one after another. Per-document fixer
/// and write faults are logged and the batch moves on; publish and discovery
/// faults abort the run with an error.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn run_batch<F: Fixer, P: Publisher>(
    root: &Path,
    config: &ActionConfig,
    context: &TriggerContext,
    fixer: &F,
    publisher: &P,
) -> Result<BatchOutcome> {
    let selection = discover(root, &config.skip_paths, config.max_files)
        .context("discover markdown files")?;

    let (state, skipped) = process_documents(
        root,
        config,
        fixer,
        BatchState::new(),
        &selection.retained,
    );

    let report = render_report(&state);
    debug!(report = %report, "rendered report");

    let published = publish_if_needed(context, &state, &report, publisher)?;

    let verdict = decide(config.thresholds(), &state);
    if verdict.is_pass() {
        info!("DeMarkX: No critical issues found.");
    }

    Ok(BatchOutcome {
        found: selection.found,
        processed: selection.retained,
        skipped,
        state,
        report,
        published,
        verdict,
    })
}

/// Invoke the fixer for each document and fold the results into `state`.
///
/// Returns the updated state and the documents that had to be skipped.
pub fn process_documents<F: Fixer>(
    root: &Path,
    config: &ActionConfig,
    fixer: &F,
    mut state: BatchState,
    documents: &[PathBuf],
) -> (BatchState, Vec<PathBuf>) {
    let mut skipped = Vec::new();
    for path in documents {
        let request = FixRequest {
            workdir: root.to_path_buf(),
            path: path.clone(),
            timeout: config.fixer.timeout(),
            output_limit_bytes: config.fixer.output_limit_bytes,
        };

        let outcome = match fixer.fix(&request) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(path = %path.display(), "Error processing {}: {err:#}", path.display());
                skipped.push(path.clone());
                continue;
            }
        };
        // A failed write is logged like any per-document fault; the findings
        // still count.
        let written = apply_safe_fixes(
            root,
            path,
            &outcome,
            config.apply_safe_fixes,
            config.dry_run,
        );
        if !state.record(path.clone(), outcome) {
            debug!(path = %path.display(), "clean");
        }
        if let Err(err) = written {
            error!(path = %path.display(), "Error processing {}: {err:#}", path.display());
        }
    }
    (state, skipped)
}

/// Post the report when the run is a review request with findings.
pub fn publish_if_needed<P: Publisher>(
    context: &TriggerContext,
    state: &BatchState,
    report: &str,
    publisher: &P,
) -> Result<bool> {
    let Some(target) = &context.review_request else {
        debug!("not a review-request context, skipping comment");
        return Ok(false);
    };
    if !state.has_findings() {
        debug!("no findings, skipping comment");
        return Ok(false);
    }
    publisher
        .create_comment(target, report)
        .context("publish report comment")?;
    Ok(true)
}
