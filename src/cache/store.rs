/// SQLite persistence layer for the workflow metadata cache
///
/// Normalized workflow records are stored one row per workflow, upserted
/// by content hash with last-writer-wins semantics. The service stamps
/// `updated_at` itself (RFC 3339 UTC) so freshness math never depends on
/// database-local clocks. Analytics events land in a second, insert-only
/// table.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePool, Row};
use std::collections::HashMap;

use crate::workflow::types::{Category, WorkflowMetadata};

/// SQLite-backed cache for normalized workflow metadata
#[derive(Debug, Clone)]
pub struct WorkflowCacheStore {
    /// SQLite connection pool for the cache database
    pool: SqlitePool,
}

impl WorkflowCacheStore {
    /// Create new store instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the cache schema
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS).
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workflows (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                node_count INTEGER NOT NULL,
                node_types JSON NOT NULL,
                category TEXT NOT NULL,
                github_url TEXT NOT NULL,
                raw_url TEXT NOT NULL,
                size INTEGER NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Name index for the ordered listing query
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_workflows_name
            ON workflows(name)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analytics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workflow_id TEXT NOT NULL,
                event_type TEXT NOT NULL,
                metadata JSON NOT NULL DEFAULT '{}',
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert a batch of workflow records keyed by id
    ///
    /// Runs in one transaction and stamps every row with the same
    /// `updated_at`, so a refresh moves the whole cache's freshness
    /// watermark at once.
    pub async fn upsert(&self, workflows: &[WorkflowMetadata]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for workflow in workflows {
            let node_types_json = serde_json::to_string(&workflow.node_types)?;

            sqlx::query(
                r#"
                INSERT INTO workflows
                    (id, name, description, node_count, node_types, category,
                     github_url, raw_url, size, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    description = excluded.description,
                    node_count = excluded.node_count,
                    node_types = excluded.node_types,
                    category = excluded.category,
                    github_url = excluded.github_url,
                    raw_url = excluded.raw_url,
                    size = excluded.size,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&workflow.id)
            .bind(&workflow.name)
            .bind(&workflow.description)
            .bind(workflow.node_count as i64)
            .bind(&node_types_json)
            .bind(workflow.category.as_str())
            .bind(&workflow.github_url)
            .bind(&workflow.raw_url)
            .bind(workflow.size as i64)
            .bind(&updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Load all cached workflows ordered by name
    ///
    /// Positions are never cached; they are recomputed per response.
    pub async fn load_all(&self) -> Result<Vec<WorkflowMetadata>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, node_count, node_types, category,
                   github_url, raw_url, size, updated_at
            FROM workflows ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut workflows = Vec::with_capacity(rows.len());
        for row in rows {
            let node_types_json: String = row.get("node_types");
            let node_types: Vec<String> = serde_json::from_str(&node_types_json)
                .context("Corrupt node_types column in cache")?;
            let category: String = row.get("category");
            let updated_at: String = row.get("updated_at");
            let node_count: i64 = row.get("node_count");
            let size: i64 = row.get("size");

            workflows.push(WorkflowMetadata {
                id: row.get("id"),
                name: row.get("name"),
                description: row.get("description"),
                node_count: node_count as usize,
                node_types,
                category: Category::from_tag(&category),
                github_url: row.get("github_url"),
                raw_url: row.get("raw_url"),
                size: size as u64,
                last_updated: parse_timestamp(&updated_at)?,
                position: None,
            });
        }

        Ok(workflows)
    }

    /// Most recent `updated_at` across all cached rows
    ///
    /// `None` means the cache has never been populated.
    pub async fn latest_update(&self) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT MAX(updated_at) AS latest FROM workflows")
            .fetch_one(&self.pool)
            .await?;

        let latest: Option<String> = row.get("latest");
        match latest {
            Some(ts) => Ok(Some(parse_timestamp(&ts)?)),
            None => Ok(None),
        }
    }

    /// Record a dashboard analytics event for a workflow
    pub async fn log_event(
        &self,
        workflow_id: &str,
        event_type: &str,
        metadata: &serde_json::Value,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO analytics (workflow_id, event_type, metadata)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(workflow_id)
        .bind(event_type)
        .bind(metadata.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// View counts per workflow id
    pub async fn view_counts(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query(
            r#"
            SELECT workflow_id, COUNT(*) AS views
            FROM analytics WHERE event_type = 'view'
            GROUP BY workflow_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = HashMap::new();
        for row in rows {
            counts.insert(row.get("workflow_id"), row.get("views"));
        }

        Ok(counts)
    }
}

/// Parse an RFC 3339 timestamp written by `upsert`
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Invalid cache timestamp: {}", value))
}
