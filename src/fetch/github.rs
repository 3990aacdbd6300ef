/// GitHub-backed workflow source
///
/// Lists the workflow repository through the GitHub contents API, fetches
/// every JSON workflow file concurrently, and builds normalized metadata
/// records. A single bad file is logged and skipped; only a failed listing
/// aborts the whole fetch.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

use crate::config::GithubConfig;
use crate::fetch::WorkflowSource;
use crate::workflow::{
    categorize::categorize,
    describe::{extract_description, node_types},
    types::{RawWorkflow, RepoFile, WorkflowMetadata},
};

/// Per-request timeout for listing and content calls. A hung upstream
/// request must not hang the dashboard request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the workflow source repository
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubClient {
    /// Create a client for the configured repository
    ///
    /// GitHub rejects requests without a User-Agent, so the crate name and
    /// version identify this service.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    /// Fetch the repository contents listing, filtered to workflow files
    ///
    /// Returns only entries that are files with a `.json` extension, in
    /// listing order. A non-success response is fatal.
    pub async fn fetch_listing(&self) -> Result<Vec<RepoFile>> {
        let url = format!(
            "{}/repos/{}/{}/contents",
            self.config.api_base, self.config.owner, self.config.repo
        );

        tracing::debug!("📡 Fetching repository listing: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await
            .context("GitHub listing request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "GitHub API error: {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("unknown")
            ));
        }

        let files: Vec<RepoFile> = response
            .json()
            .await
            .context("Failed to decode repository listing")?;

        Ok(files
            .into_iter()
            .filter(|file| file.kind == "file" && file.name.ends_with(".json"))
            .collect())
    }

    /// Fetch and parse a single workflow file
    async fn fetch_workflow(&self, download_url: &str) -> Result<RawWorkflow> {
        let response = self
            .http
            .get(download_url)
            .send()
            .await
            .context("Workflow content request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch workflow: {}",
                response.status()
            ));
        }

        let body = response
            .text()
            .await
            .context("Failed to read workflow content")?;

        serde_json::from_str(&body).context("Failed to parse workflow JSON")
    }

    /// Build the normalized metadata record for one fetched file
    fn build_metadata(file: &RepoFile, workflow: &RawWorkflow) -> WorkflowMetadata {
        // Prefer the name embedded in the definition; exports without one
        // fall back to the file name. Categorization sees the same string
        // the dashboard will display, extension included on the fallback.
        let category = categorize(workflow.name.as_deref().unwrap_or(&file.name));
        let name = workflow
            .name
            .clone()
            .unwrap_or_else(|| file.name.trim_end_matches(".json").to_string());

        WorkflowMetadata {
            id: file.sha.clone(),
            name,
            description: extract_description(workflow),
            node_count: workflow.nodes.len(),
            node_types: node_types(workflow),
            category,
            github_url: file.html_url.clone(),
            raw_url: file.download_url.clone(),
            size: file.size,
            last_updated: Utc::now(),
            position: None,
        }
    }
}

#[async_trait]
impl WorkflowSource for GithubClient {
    /// Fetch all workflows and transform them to metadata records
    ///
    /// Content fetches fan out as concurrent tasks and are joined in
    /// listing order, so the result keeps the listing's ordering minus any
    /// files that failed to fetch or parse.
    async fn fetch_all(&self) -> Result<Vec<WorkflowMetadata>> {
        let files = self.fetch_listing().await?;

        tracing::info!("📥 Fetching {} workflow files", files.len());

        let handles: Vec<_> = files
            .into_iter()
            .map(|file| {
                let client = self.clone();
                tokio::spawn(async move {
                    match client.fetch_workflow(&file.download_url).await {
                        Ok(workflow) => Some(GithubClient::build_metadata(&file, &workflow)),
                        Err(e) => {
                            tracing::warn!("⚠️ Skipping workflow {}: {:#}", file.name, e);
                            None
                        }
                    }
                })
            })
            .collect();

        let mut workflows = Vec::with_capacity(handles.len());
        for handle in handles {
            // A panicked fetch task counts as a skipped file, not a batch
            // failure
            match handle.await {
                Ok(Some(metadata)) => workflows.push(metadata),
                Ok(None) => {}
                Err(e) => tracing::warn!("⚠️ Workflow fetch task failed: {}", e),
            }
        }

        tracing::info!("✅ Normalized {} workflows", workflows.len());

        Ok(workflows)
    }
}
