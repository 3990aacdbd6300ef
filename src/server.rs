/// Server setup and initialization
///
/// Wires together the GitHub client, the optional cache store, and the
/// coordinator, and exposes them through the HTTP routes. Provides the
/// application factory used by both the binary and integration tests.

use crate::{
    api::{
        analytics::create_analytics_routes,
        workflows::{create_workflow_routes, AppState},
    },
    cache::{coordinator::WorkflowProvider, store::WorkflowCacheStore},
    config::Config,
    fetch::github::GithubClient,
};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Connects to the cache database when one is configured; otherwise the
/// service runs cache-less and serves every request straight from GitHub.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!(
        "📡 Workflow source: {}/{}",
        config.github.owner,
        config.github.repo
    );
    let github = GithubClient::new(config.github.clone())?;

    let store = match &config.cache.database_url {
        Some(url) => {
            tracing::info!("🗄️ Connecting to cache database");
            let options = url
                .parse::<sqlx::sqlite::SqliteConnectOptions>()
                .with_context(|| format!("Invalid cache database URL: {}", url))?
                .create_if_missing(true);
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .connect_with(options)
                .await
                .with_context(|| format!("Failed to connect to cache database: {}", url))?;

            let store = WorkflowCacheStore::new(pool);
            store.init_schema().await?;
            Some(store)
        }
        None => {
            tracing::warn!("🗄️ No cache database configured, serving GitHub directly");
            None
        }
    };

    let provider = Arc::new(WorkflowProvider::new(
        Arc::new(github),
        store,
        config.cache.ttl_ms,
    ));

    let app_state = AppState { provider };

    let app = Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Workflow listing and refresh
        .merge(create_workflow_routes())
        // Dashboard analytics
        .merge(create_analytics_routes())
        .with_state(app_state);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Starting workflow-galaxy server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
