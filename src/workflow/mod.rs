/// Workflow Metadata Layer
///
/// This module handles raw workflow definitions and their normalization:
/// - Type definitions (RawWorkflow, RepoFile, WorkflowMetadata, Category)
/// - Keyword-based categorization
/// - Description and node-type extraction from raw n8n JSON

// Core workflow type definitions
pub mod types;

// Keyword categorizer for galaxy clustering
pub mod categorize;

// Description and node-type extraction from raw definitions
pub mod describe;

// Re-export commonly used types
pub use categorize::categorize;
pub use types::{Category, Position, RawNode, RawWorkflow, RepoFile, WorkflowMetadata};
