//! Trigger context read from the GitHub Actions environment.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository identity (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(anyhow!("invalid repository {raw:?}, expected owner/name")),
        }
    }
}

/// Where a review comment should be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTarget {
    pub repository: Repository,
    pub number: u64,
}

/// How the run was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    pub api_url: String,
    /// Set only for review-request (pull request) events.
    pub review_request: Option<CommentTarget>,
}

impl Default for TriggerContext {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            review_request: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    number: u64,
}

impl TriggerContext {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the context from `GITHUB_*` variables supplied by `lookup`.
    ///
    /// A payload with a `pull_request` object marks a review-request run; it
    /// then requires a valid `GITHUB_REPOSITORY`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("GITHUB_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let Some(event_path) = lookup("GITHUB_EVENT_PATH").filter(|p| !p.is_empty()) else {
            debug!("no event payload, not a review-request context");
            return Ok(Self {
                api_url,
                review_request: None,
            });
        };

        let number = match read_pull_request_number(Path::new(&event_path))? {
            Some(number) => number,
            None => {
                return Ok(Self {
                    api_url,
                    review_request: None,
                });
            }
        };
        let raw_repo = lookup("GITHUB_REPOSITORY")
            .ok_or_else(|| anyhow!("GITHUB_REPOSITORY must be set for pull request events"))?;
        let repository = Repository::parse(&raw_repo)?;
        debug!(
            owner = %repository.owner,
            repo = %repository.name,
            number,
            "review-request context"
        );

        Ok(Self {
            api_url,
            review_request: Some(CommentTarget { repository, number }),
        })
    }
}

fn read_pull_request_number(path: &Path) -> Result<Option<u64>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read event payload {}", path.display()))?;
    let payload: EventPayload = serde_json::from_str(&contents)
        .with_context(|| format!("parse event payload {}", path.display()))?;
    Ok(payload.pull_request.map(|pr| pr.number))
}
