//! DeMarkX batch action.
//!
//! Runs the DeMarkX fixer over every Markdown document in the workspace and
//! turns the combined findings into one PR comment and one pass/fail signal.
//! Inputs come from flags or from the `INPUT_*` variables the Actions runner
//! sets for `with:` values.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use demarkx_action::batch::{BatchOutcome, run_batch};
use demarkx_action::core::types::Verdict;
use demarkx_action::exit_codes;
use demarkx_action::io::config::{
    DEFAULT_CONFIG_FILE, InputOverrides, apply_inputs, load_config,
};
use demarkx_action::io::context::TriggerContext;
use demarkx_action::io::fixer::CommandFixer;
use demarkx_action::io::publisher::GitHubPublisher;
use demarkx_action::io::workflow;
use demarkx_action::logging;

#[derive(Parser)]
#[command(
    name = "demarkx-action",
    version,
    about = "Run the DeMarkX fixer across a repository and report the results"
)]
struct Cli {
    /// Workspace root to scan.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML config file (defaults to `.demarkx.toml` under the root).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write safe fixes back to the documents (`true`/`false`).
    #[arg(long, env = "INPUT_APPLY-SAFE-FIXES")]
    apply_safe_fixes: Option<String>,

    /// Fail when any inferred fix is reported.
    #[arg(long, env = "INPUT_FAIL-ON-INFERRED")]
    fail_on_inferred: Option<String>,

    /// Fail when any lint issue is reported.
    #[arg(long, env = "INPUT_FAIL-ON-LINT")]
    fail_on_lint: Option<String>,

    /// Log intended writes without modifying files.
    #[arg(long, env = "INPUT_DRY-RUN")]
    dry_run: Option<String>,

    /// Maximum number of documents to process.
    #[arg(long, env = "INPUT_MAX-FILES")]
    max_files: Option<String>,

    /// Comma-separated globs to skip in addition to the built-in ignores.
    #[arg(long, env = "INPUT_SKIP-PATHS")]
    skip_paths: Option<String>,

    /// Fixer command prefix; `fix <path> --json` is appended.
    #[arg(long, env = "INPUT_FIXER-COMMAND")]
    fixer_command: Option<String>,

    /// Seconds to wait for one fixer invocation.
    #[arg(long, env = "INPUT_FIXER-TIMEOUT-SECS")]
    fixer_timeout_secs: Option<String>,

    /// Token used to comment on pull requests.
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

impl Cli {
    fn overrides(&self) -> InputOverrides {
        InputOverrides {
            apply_safe_fixes: self.apply_safe_fixes.clone(),
            fail_on_inferred: self.fail_on_inferred.clone(),
            fail_on_lint: self.fail_on_lint.clone(),
            dry_run: self.dry_run.clone(),
            max_files: self.max_files.clone(),
            skip_paths: self.skip_paths.clone(),
            fixer_command: self.fixer_command.clone(),
            fixer_timeout_secs: self.fixer_timeout_secs.clone(),
            github_token: self.github_token.clone(),
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            let message = format!("{err:#}");
            eprintln!("{message}");
            workflow::error(&message);
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(DEFAULT_CONFIG_FILE));
    let base = load_config(&config_path)?;
    let config = apply_inputs(base, &cli.overrides()).context("resolve action inputs")?;
    let context = TriggerContext::from_env().context("read trigger context")?;

    let fixer = CommandFixer::new(config.fixer.command.clone())?;
    let publisher = GitHubPublisher::new(
        context.api_url.clone(),
        config.credential.clone(),
        config.publish.timeout(),
    )?;

    let outcome = run_batch(&cli.root, &config, &context, &fixer, &publisher)?;
    write_step_outputs(&outcome)?;

    match &outcome.verdict {
        Verdict::Pass => Ok(exit_codes::OK),
        Verdict::Fail(reason) => {
            eprintln!("{reason}");
            workflow::error(reason);
            Ok(exit_codes::FAILED)
        }
    }
}

fn write_step_outputs(outcome: &BatchOutcome) -> Result<()> {
    let Some(path) = std::env::var_os(workflow::OUTPUT_FILE_ENV) else {
        return Ok(());
    };
    let state = &outcome.state;
    let outputs = [
        ("safe-fixes", state.safe_fixes.len().to_string()),
        ("inferred-fixes", state.inferred_fixes.len().to_string()),
        ("lint-issues", state.lint_issues.len().to_string()),
        ("files-with-issues", state.files.len().to_string()),
        ("files-skipped", outcome.skipped.len().to_string()),
    ];
    workflow::write_outputs(PathBuf::from(path).as_path(), &outputs)?;
    info!(published = outcome.published, "step outputs written");
    Ok(())
}
