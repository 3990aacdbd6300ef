/// HTTP API layer
///
/// REST endpoints serving the dashboard: the workflow listing with its
/// cache pipeline and galaxy positions, the manual cache refresh, and
/// analytics event logging.

// Workflow listing and refresh endpoints
pub mod workflows;

// Analytics event endpoints
pub mod analytics;

pub use workflows::AppState;
