//! Review comment publishing.
//!
//! The [`Publisher`] trait isolates the single platform call the action makes
//! so the publish condition can be tested without network access.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use tracing::{info, instrument};

use crate::io::config::Credential;
use crate::io::context::CommentTarget;

const USER_AGENT: &str = concat!("demarkx-action/", env!("CARGO_PKG_VERSION"));

/// Abstraction over comment publishing backends.
pub trait Publisher {
    /// Create one comment on `target`. No retries.
    fn create_comment(&self, target: &CommentTarget, body: &str) -> Result<()>;
}

/// Publisher backed by the GitHub REST API.
pub struct GitHubPublisher {
    client: Client,
    api_url: String,
    credential: Option<Credential>,
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

impl GitHubPublisher {
    pub fn new(
        api_url: impl Into<String>,
        credential: Option<Credential>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            credential,
        })
    }
}

impl Publisher for GitHubPublisher {
    #[instrument(skip_all, fields(number = target.number))]
    fn create_comment(&self, target: &CommentTarget, body: &str) -> Result<()> {
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| anyhow!("github-token is required to comment on pull requests"))?;
        let url = comment_url(&self.api_url, target);

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("Bearer {}", credential.expose()))
            .json(&CommentRequest { body })
            .send()
            .with_context(|| format!("POST {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(anyhow!(
                "create comment on #{} failed with {status}: {}",
                target.number,
                detail.trim()
            ));
        }
        info!(number = target.number, "posted report comment");
        Ok(())
    }
}

/// REST endpoint for creating a comment on an issue or pull request.
pub fn comment_url(api_url: &str, target: &CommentTarget) -> String {
    format!(
        "{}/repos/{}/{}/issues/{}/comments",
        api_url.trim_end_matches('/'),
        target.repository.owner,
        target.repository.name,
        target.number
    )
}
