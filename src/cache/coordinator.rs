/// Cache-or-fetch coordination
///
/// Decides per request whether to serve cached metadata, refresh from the
/// remote source, or run cache-less. The freshness window is enforced over
/// the newest `updated_at` in the cache; cache read failures degrade to a
/// refresh instead of failing the request. Miss-path cache writes are fire
/// and forget, manual refreshes write synchronously so the caller can
/// trust the cache afterwards.

use anyhow::Result;
use chrono::{Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::cache::store::WorkflowCacheStore;
use crate::fetch::WorkflowSource;
use crate::workflow::types::WorkflowMetadata;

/// Where a response's workflow set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    /// Served from the durable cache within the freshness window
    Cache,
    /// Fetched from GitHub on a cache miss, cache repopulated in background
    Github,
    /// Fetched from GitHub with no cache configured at all
    GithubDirect,
}

/// Coordinates the durable cache with the remote workflow source
pub struct WorkflowProvider {
    source: Arc<dyn WorkflowSource>,
    store: Option<WorkflowCacheStore>,
    ttl: Duration,
}

impl WorkflowProvider {
    /// Create a provider; `store: None` puts it in cache-less mode
    pub fn new(
        source: Arc<dyn WorkflowSource>,
        store: Option<WorkflowCacheStore>,
        ttl_ms: i64,
    ) -> Self {
        Self {
            source,
            store,
            ttl: Duration::milliseconds(ttl_ms),
        }
    }

    /// Get the current workflow set and where it came from
    ///
    /// Fresh, non-empty cache contents are served as-is. An expired or
    /// empty cache triggers a source fetch whose result is written back to
    /// the cache in a detached task; the response never waits for that
    /// write and never sees its failure.
    pub async fn get_workflows(&self) -> Result<(Vec<WorkflowMetadata>, Source)> {
        let store = match &self.store {
            Some(store) => store,
            None => {
                let workflows = self.source.fetch_all().await?;
                return Ok((workflows, Source::GithubDirect));
            }
        };

        if self.cache_is_fresh(store).await {
            match store.load_all().await {
                // An empty result despite a fresh watermark means the
                // cache has nothing usable; treat it as a miss
                Ok(cached) if !cached.is_empty() => {
                    tracing::debug!("📦 Serving {} workflows from cache", cached.len());
                    return Ok((cached, Source::Cache));
                }
                Ok(_) => {
                    tracing::warn!("📦 Cache is fresh but empty, refetching");
                }
                Err(e) => {
                    tracing::warn!("⚠️ Cache read failed, falling back to GitHub: {:#}", e);
                }
            }
        }

        let workflows = self.source.fetch_all().await?;

        // Repopulate the cache without blocking the response; a failed
        // write only shows up in the logs
        let store = store.clone();
        let to_cache = workflows.clone();
        tokio::spawn(async move {
            if let Err(e) = store.upsert(&to_cache).await {
                tracing::error!("❌ Cache update failed: {:#}", e);
            }
        });

        Ok((workflows, Source::Github))
    }

    /// Force a refresh from the source, bypassing the freshness check
    ///
    /// The cache write (when a cache is configured) is awaited, so a
    /// successful return means the cache really was updated. Returns the
    /// number of workflows fetched.
    pub async fn refresh(&self) -> Result<usize> {
        let workflows = self.source.fetch_all().await?;

        if let Some(store) = &self.store {
            store.upsert(&workflows).await?;
            tracing::info!("🔄 Cache refreshed with {} workflows", workflows.len());
        }

        Ok(workflows.len())
    }

    /// Whether a configured cache is connected
    pub fn cache_connected(&self) -> bool {
        self.store.is_some()
    }

    /// Cache store handle for analytics queries
    pub fn store(&self) -> Option<&WorkflowCacheStore> {
        self.store.as_ref()
    }

    /// True when the cache was populated within the freshness window
    ///
    /// A read error counts as stale: the request then degrades to the
    /// remote path instead of failing.
    async fn cache_is_fresh(&self, store: &WorkflowCacheStore) -> bool {
        match store.latest_update().await {
            Ok(Some(last_updated)) => Utc::now() - last_updated <= self.ttl,
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("⚠️ Cache metadata read failed, treating as stale: {:#}", e);
                false
            }
        }
    }
}
