//! Action configuration: defaults, optional `.demarkx.toml`, then action inputs.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::verdict::Thresholds;
use crate::io::discovery::compile_globset;

/// Default location of the optional config file, relative to the workspace root.
pub const DEFAULT_CONFIG_FILE: &str = ".demarkx.toml";

/// Validated configuration for one run.
///
/// Built once at process start and read-only afterwards. Missing TOML fields
/// take the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActionConfig {
    /// Overwrite documents with the fixer's corrected text when safe fixes exist.
    pub apply_safe_fixes: bool,

    /// Fail the run when any inferred fix is reported.
    pub fail_on_inferred: bool,

    /// Fail the run when any lint issue is reported.
    pub fail_on_lint: bool,

    /// Log intended writes instead of touching the working tree.
    pub dry_run: bool,

    /// Maximum number of documents processed per run.
    pub max_files: usize,

    /// Extra ignore globs on top of the built-in baseline.
    pub skip_paths: Vec<String>,

    pub fixer: FixerConfig,

    pub publish: PublishConfig,

    /// Platform token. Only accepted from action inputs.
    #[serde(skip)]
    pub credential: Option<Credential>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FixerConfig {
    /// Command prefix; `fix <path> --json` is appended per document.
    pub command: Vec<String>,

    pub timeout_secs: u64,

    /// Truncate captured fixer stdout/stderr beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            command: vec!["demarkx".to_string()],
            timeout_secs: 120,
            output_limit_bytes: 1_000_000,
        }
    }
}

impl FixerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PublishConfig {
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl PublishConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            apply_safe_fixes: false,
            fail_on_inferred: false,
            fail_on_lint: false,
            dry_run: false,
            max_files: 50,
            skip_paths: Vec::new(),
            fixer: FixerConfig::default(),
            publish: PublishConfig::default(),
            credential: None,
        }
    }
}

impl ActionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(anyhow!("max_files must be > 0"));
        }
        if self.fixer.command.is_empty() || self.fixer.command[0].trim().is_empty() {
            return Err(anyhow!("fixer.command must be a non-empty array"));
        }
        if self.fixer.timeout_secs == 0 {
            return Err(anyhow!("fixer.timeout_secs must be > 0"));
        }
        if self.fixer.output_limit_bytes == 0 {
            return Err(anyhow!("fixer.output_limit_bytes must be > 0"));
        }
        if self.publish.timeout_secs == 0 {
            return Err(anyhow!("publish.timeout_secs must be > 0"));
        }
        compile_globset(&self.skip_paths).context("invalid skip_paths")?;
        Ok(())
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            fail_on_inferred: self.fail_on_inferred,
            fail_on_lint: self.fail_on_lint,
        }
    }
}

/// Opaque platform token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Raw action inputs (CLI flags or `INPUT_*` variables).
///
/// Values arrive as strings, the way the Actions runner provides them.
/// `None` or a blank value leaves the file/default value in place.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub apply_safe_fixes: Option<String>,
    pub fail_on_inferred: Option<String>,
    pub fail_on_lint: Option<String>,
    pub dry_run: Option<String>,
    pub max_files: Option<String>,
    /// Comma-separated glob list.
    pub skip_paths: Option<String>,
    /// Whitespace-separated command prefix.
    pub fixer_command: Option<String>,
    pub fixer_timeout_secs: Option<String>,
    pub github_token: Option<String>,
}

/// Apply action inputs on top of a base config and validate the result.
pub fn apply_inputs(mut base: ActionConfig, inputs: &InputOverrides) -> Result<ActionConfig> {
    if let Some(value) = parse_bool_input("apply-safe-fixes", &inputs.apply_safe_fixes)? {
        base.apply_safe_fixes = value;
    }
    if let Some(value) = parse_bool_input("fail-on-inferred", &inputs.fail_on_inferred)? {
        base.fail_on_inferred = value;
    }
    if let Some(value) = parse_bool_input("fail-on-lint", &inputs.fail_on_lint)? {
        base.fail_on_lint = value;
    }
    if let Some(value) = parse_bool_input("dry-run", &inputs.dry_run)? {
        base.dry_run = value;
    }
    if let Some(raw) = non_blank(&inputs.max_files) {
        let value: i64 = raw
            .parse()
            .with_context(|| format!("max-files must be an integer, got {raw:?}"))?;
        if value <= 0 {
            bail!("max-files must be a positive integer, got {value}");
        }
        base.max_files = usize::try_from(value).context("max-files out of range")?;
    }
    if let Some(raw) = non_blank(&inputs.skip_paths) {
        base.skip_paths.extend(parse_skip_paths(raw));
    }
    if let Some(raw) = non_blank(&inputs.fixer_command) {
        base.fixer.command = raw.split_whitespace().map(str::to_string).collect();
    }
    if let Some(raw) = non_blank(&inputs.fixer_timeout_secs) {
        base.fixer.timeout_secs = raw
            .parse()
            .with_context(|| format!("fixer-timeout-secs must be an integer, got {raw:?}"))?;
    }
    if let Some(token) = non_blank(&inputs.github_token) {
        base.credential = Some(Credential::new(token));
    }
    base.validate()?;
    debug!(config = ?base, "configuration resolved");
    Ok(base)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse a boolean action input. Accepts `true`/`false` in any case.
fn parse_bool_input(name: &str, value: &Option<String>) -> Result<Option<bool>> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        _ => Err(anyhow!("{name} must be true or false, got {raw:?}")),
    }
}

/// Split a comma-separated glob list, dropping blank entries.
pub fn parse_skip_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ActionConfig::default()`.
pub fn load_config(path: &Path) -> Result<ActionConfig> {
    if !path.exists() {
        let cfg = ActionConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ActionConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
