/// Workflow Galaxy: backend for the 3D workflow dashboard
///
/// This library ingests automation workflow files from a GitHub
/// repository, normalizes them into categorized metadata, caches the
/// results in SQLite with a freshness window, and assigns each workflow a
/// deterministic position in the galaxy view.

// Core configuration and setup
pub mod config;

// Workflow types, categorization, and description extraction
pub mod workflow;

// Remote ingestion from the source repository
pub mod fetch;

// Durable cache and cache-or-fetch coordination
pub mod cache;

// Deterministic 3D layout for the galaxy view
pub mod galaxy;

// HTTP API layer
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use cache::{Source, WorkflowCacheStore, WorkflowProvider};
pub use fetch::{GithubClient, WorkflowSource};
pub use galaxy::calculate_galaxy_positions;
pub use server::start_server;
pub use workflow::{Category, Position, RawWorkflow, WorkflowMetadata};
