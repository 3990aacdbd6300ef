/// Core workflow type definitions
///
/// Defines the raw n8n workflow JSON shapes as fetched from GitHub, the
/// repository listing entry, and the normalized metadata record served to
/// the dashboard. Wire formats are camelCase to match the frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw n8n workflow definition as stored in the repository JSON files
///
/// Only the fields the pipeline needs are modeled; everything else in the
/// file (connections, settings, pinned data) is ignored on deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct RawWorkflow {
    /// Workflow name as set in the n8n editor (may be absent in exports)
    pub name: Option<String>,
    /// Ordered list of nodes in the workflow
    pub nodes: Vec<RawNode>,
}

/// A single node inside a raw workflow definition
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Node identifier within the workflow
    pub id: Option<String>,
    /// Display name of the node
    pub name: Option<String>,
    /// Node type string (e.g. "n8n-nodes-base.httpRequest")
    #[serde(rename = "type")]
    pub node_type: String,
    /// Node-specific configuration as flexible JSON
    pub parameters: Option<Value>,
}

/// One entry of the GitHub repository contents listing
///
/// Field names follow the GitHub REST API response verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoFile {
    pub name: String,
    pub path: String,
    /// Git blob SHA of the file content, stable across unchanged content
    pub sha: String,
    pub size: u64,
    pub url: String,
    pub html_url: String,
    pub download_url: String,
    /// "file" or "dir"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Workflow categories used for clustering in the galaxy view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Ai,
    Seo,
    Hr,
    LeadGen,
    Monitoring,
    Data,
    Other,
}

impl Category {
    /// Stable string tag, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "ai",
            Category::Seo => "seo",
            Category::Hr => "hr",
            Category::LeadGen => "lead-gen",
            Category::Monitoring => "monitoring",
            Category::Data => "data",
            Category::Other => "other",
        }
    }

    /// Parse a stored tag back into a category, tolerating unknown values
    pub fn from_tag(tag: &str) -> Category {
        match tag {
            "ai" => Category::Ai,
            "seo" => Category::Seo,
            "hr" => Category::Hr,
            "lead-gen" => Category::LeadGen,
            "monitoring" => Category::Monitoring,
            "data" => Category::Data,
            _ => Category::Other,
        }
    }
}

/// 3D coordinate assigned to a workflow by the galaxy layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Normalized workflow metadata served to the dashboard
///
/// This is the canonical output unit of the ingestion pipeline. `id` is the
/// upstream content hash, so it stays stable as long as the file content
/// does. `position` is absent until the galaxy layout runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    /// Content hash of the source file (GitHub blob SHA)
    pub id: String,
    pub name: String,
    /// Human-readable summary, at most ~200 characters
    pub description: String,
    pub node_count: usize,
    /// Deduplicated node type strings in first-occurrence order
    pub node_types: Vec<String>,
    pub category: Category,
    /// Link to the file on github.com
    pub github_url: String,
    /// Direct raw-content download URL
    pub raw_url: String,
    /// File size in bytes from the listing
    pub size: u64,
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}
