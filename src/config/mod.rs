/// Configuration management for the workflow galaxy backend
///
/// Handles server binding, the GitHub source repository, and the cache
/// database settings. Every field can be overridden through environment
/// variables for container deployment.

use serde::{Deserialize, Serialize};

/// Freshness window for cached workflow metadata (5 minutes)
pub const DEFAULT_CACHE_TTL_MS: i64 = 5 * 60 * 1000;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Source repository configuration
    pub github: GithubConfig,
    /// Cache database configuration
    pub cache: CacheConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// GitHub repository holding the workflow JSON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// API base URL, overridable so tests can point at a local stub
    pub api_base: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
}

/// Durable cache configuration
///
/// The cache is optional: without a database URL the service serves every
/// request straight from GitHub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// SQLite database URL; `None` disables caching entirely
    pub database_url: Option<String>,
    /// Maximum age of cached results before they count as stale
    pub ttl_ms: i64,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("GALAXY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("GALAXY_PORT")
                    .unwrap_or_else(|_| "3007".to_string())
                    .parse()
                    .unwrap_or(3007),
            },
            github: GithubConfig {
                api_base: std::env::var("GALAXY_GITHUB_API")
                    .unwrap_or_else(|_| "https://api.github.com".to_string()),
                owner: std::env::var("GALAXY_REPO_OWNER").unwrap_or_else(|_| "DvCud".to_string()),
                repo: std::env::var("GALAXY_REPO_NAME")
                    .unwrap_or_else(|_| "n8n-workflows".to_string()),
            },
            cache: CacheConfig {
                database_url: cache_url_from_env(),
                ttl_ms: std::env::var("GALAXY_CACHE_TTL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_MS),
            },
        }
    }
}

/// Read the cache database URL, treating unset, empty, and template
/// placeholder values (as shipped in .env examples) as "no cache"
fn cache_url_from_env() -> Option<String> {
    let url = std::env::var("GALAXY_CACHE_DB").ok()?;
    if url.is_empty() || url.contains("your-project") {
        return None;
    }
    Some(url)
}
