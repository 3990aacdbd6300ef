/// Durable cache layer
///
/// SQLite persistence for normalized workflow metadata plus the
/// coordinator that decides, per request, whether to serve cached rows,
/// refresh from the source, or bypass caching entirely.

// SQLite persistence for workflow metadata and analytics events
pub mod store;

// Cache-or-fetch decision logic
pub mod coordinator;

pub use coordinator::{Source, WorkflowProvider};
pub use store::WorkflowCacheStore;
