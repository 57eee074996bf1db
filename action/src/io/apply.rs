//! Safe-fix application: the only step that writes to the working tree.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::types::FixOutcome;

/// What the applier did for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    /// Preconditions not met; the file was not touched.
    Skipped,
    /// Dry run: the write was logged but not performed.
    WouldWrite,
    /// The corrected content was written.
    Written,
}

/// Write the fixer's corrected text over `root/path` when allowed.
///
/// Requires `apply_safe_fixes` and at least one safe fix. `dry_run` turns the
/// write into a log line.
pub fn apply_safe_fixes(
    root: &Path,
    path: &Path,
    outcome: &FixOutcome,
    apply_safe_fixes: bool,
    dry_run: bool,
) -> Result<ApplyAction> {
    if !apply_safe_fixes {
        return Ok(ApplyAction::Skipped);
    }
    let Some(content) = outcome.safe_rewrite() else {
        return Ok(ApplyAction::Skipped);
    };

    if dry_run {
        info!("[DRY RUN] Would apply safe fixes to {}", path.display());
        return Ok(ApplyAction::WouldWrite);
    }

    let target = root.join(path);
    fs::write(&target, content)
        .with_context(|| format!("write safe fixes to {}", target.display()))?;
    info!("Applied safe fixes to {}", path.display());
    Ok(ApplyAction::Written)
}
