//! Markdown document discovery under the workspace root.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, info, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use crate::core::selection::{Selection, truncate_to_max};
use crate::io::workflow;

/// Ignore patterns applied on every run, before caller-supplied ones.
pub const BASELINE_IGNORES: &[&str] =
    &["**/node_modules/**", "**/venv/**", "**/github-action/**"];

/// File extensions treated as Markdown documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Compile ignore globs. `*` and `?` stop at `/`; only `**` crosses directories.
pub fn compile_globset(globs: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = GlobBuilder::new(g)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob: {g:?}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Enumerate Markdown documents below `root`, relative to it.
///
/// Directory entries are visited depth-first in file-name order, so the
/// result is identical across runners. Hidden entries are skipped. Symlinks
/// to files count as documents; symlinked directories are not descended.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn find_documents(root: &Path, skip_paths: &[String]) -> Result<Vec<PathBuf>> {
    let mut patterns: Vec<String> = BASELINE_IGNORES.iter().map(|p| p.to_string()).collect();
    patterns.extend(skip_paths.iter().cloned());
    let ignore = compile_globset(&patterns).context("compile ignore patterns")?;

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", root.display()))?;
        if !entry.path().is_file() || !has_document_extension(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        if ignore.is_match(relative) {
            debug!(path = %relative.display(), "ignored");
            continue;
        }
        documents.push(relative.to_path_buf());
    }
    Ok(documents)
}

/// Find documents and apply the `max_files` cap.
///
/// Overflow is reported as a warning; the run continues with the prefix.
pub fn discover(
    root: &Path,
    skip_paths: &[String],
    max_files: usize,
) -> Result<Selection<PathBuf>> {
    let documents = find_documents(root, skip_paths)?;
    info!("DeMarkX: Found {} Markdown files for processing.", documents.len());

    let selection = truncate_to_max(documents, max_files);
    if selection.is_truncated() {
        let message = overflow_message(selection.found, max_files);
        warn!(
            found = selection.found,
            max_files,
            overflow = selection.overflow(),
            "{message}"
        );
        workflow::warning(&message);
    }
    for path in &selection.retained {
        info!("  - Processing: {}", path.display());
    }
    Ok(selection)
}

pub fn overflow_message(found: usize, max_files: usize) -> String {
    format!(
        "DeMarkX: Found {found} files, but max-files is set to {max_files}. \
         Only the first {max_files} will be processed."
    )
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}
