/// Workflow Galaxy: backend for the 3D workflow dashboard
///
/// Main entry point. Initializes configuration and starts the HTTP server.

use workflow_galaxy::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Workflow listing with galaxy positions at GET /api/workflows
/// - Manual cache refresh at POST /api/workflows
/// - Analytics events at /api/analytics/*
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults plus GALAXY_* environment overrides)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
