/// Remote workflow ingestion
///
/// Fetches workflow definition files from the source repository and
/// normalizes them into metadata records. The `WorkflowSource` trait is the
/// seam the cache coordinator depends on, so alternative sources (or test
/// stubs) can stand in for the GitHub client.

use anyhow::Result;
use async_trait::async_trait;

use crate::workflow::types::WorkflowMetadata;

// GitHub-backed source implementation
pub mod github;

pub use github::GithubClient;

/// A source of normalized workflow metadata
///
/// `fetch_all` fails only when the file listing itself cannot be
/// retrieved; individual unreadable or malformed files are skipped.
#[async_trait]
pub trait WorkflowSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<WorkflowMetadata>>;
}
