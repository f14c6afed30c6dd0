// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Bounded-history relational cache.
//!
//! Two tables per the retention design:
//!
//! - `cache`, the latest-snapshot table: per poll, all rows for a metric are
//!   replaced by the newly fetched set inside one transaction, so the table
//!   always reflects exactly one successful poll, never a partial union of
//!   two.
//! - `cache_history`, the rolling-history table: insert-only, stamped with
//!   the poll's capture time, trimmed in the same transaction to the newest
//!   `depth x record_count` rows per metric. Coupling the bound to entity
//!   cardinality keeps a fixed *time* window of history regardless of how
//!   many entities exist.
//!
//! History does not survive a restart: `init_schema` truncates it, while the
//! snapshot table is left intact as acceptable interim exposure until the
//! first successful poll.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::client::FrmClient;
use crate::error::{FrmError, Result};

/// Default number of polls of history retained per metric.
pub const DEFAULT_HISTORY_DEPTH: i64 = 30;

/// One metric stream: a cache name and the API route it is fed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRoute {
    pub name: String,
    pub route: String,
    /// Whether the rolling-history table tracks this metric too.
    pub keep_history: bool,
}

impl MetricRoute {
    fn new(name: &str, route: &str) -> Self {
        Self {
            name: name.to_string(),
            route: route.to_string(),
            keep_history: true,
        }
    }

    /// The route suffix as an absolute path, e.g. `/getFactory`.
    pub fn path(&self) -> String {
        format!("/{}", self.route)
    }
}

/// The built-in metric-route list, used when no configuration file is given.
pub fn default_routes() -> Vec<MetricRoute> {
    vec![
        MetricRoute::new("factory", "getFactory"),
        MetricRoute::new("extractor", "getExtractor"),
        MetricRoute::new("dropPod", "getDropPod"),
        MetricRoute::new("storageInv", "getStorageInv"),
        MetricRoute::new("worldInv", "getWorldInv"),
        MetricRoute::new("droneStation", "getDroneStation"),
        MetricRoute::new("generators", "getGenerator"),
        MetricRoute::new("drone", "getDrone"),
        MetricRoute::new("train", "getTrains"),
        MetricRoute::new("truck", "getVehicles"),
        MetricRoute::new("trainStation", "getTrainStation"),
        MetricRoute::new("truckStation", "getTruckStation"),
    ]
}

/// Load a metric-route list from a CSV file of `name,route` rows, with an
/// optional third `history` column (`true`/`false`, default true).
pub fn load_routes(path: &Path) -> Result<Vec<MetricRoute>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| FrmError::MetricsFile(e.to_string()))?;

    let mut routes = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FrmError::MetricsFile(e.to_string()))?;
        let keep_history = match record.len() {
            2 => true,
            3 => match record[2].trim() {
                "true" => true,
                "false" => false,
                other => {
                    return Err(FrmError::MetricsFile(format!(
                        "invalid history flag {other:?} for metric {:?}",
                        &record[0]
                    )))
                }
            },
            n => {
                return Err(FrmError::MetricsFile(format!(
                    "expected 2 or 3 columns, got {n}: {record:?}"
                )))
            }
        };
        routes.push(MetricRoute {
            name: record[0].trim().to_string(),
            route: record[1].trim().to_string(),
            keep_history,
        });
    }
    Ok(routes)
}

/// Rolling-history row bound for one metric after a poll of `record_count`
/// records at the given retention depth.
pub fn trim_limit(depth: i64, record_count: usize) -> i64 {
    depth * record_count as i64
}

/// The retention cache over a shared Postgres connection pool.
#[derive(Debug, Clone)]
pub struct MetricCache {
    pool: PgPool,
    history_depth: i64,
}

impl MetricCache {
    pub fn new(pool: PgPool, history_depth: i64) -> Self {
        Self {
            pool,
            history_depth,
        }
    }

    /// Create both tables and their metric-name indexes idempotently, then
    /// drop any stale history from a previous run.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache (
                id bigserial PRIMARY KEY,
                metric text NOT NULL,
                frm_data jsonb
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS cache_metric_idx ON cache(metric)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache_history (
                id bigserial PRIMARY KEY,
                metric text NOT NULL,
                frm_data jsonb,
                captured_at timestamptz NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS cache_history_metric_idx ON cache_history(metric)")
            .execute(&self.pool)
            .await?;

        // Replayed stale captures are worse than an empty history.
        sqlx::query("TRUNCATE TABLE cache_history")
            .execute(&self.pool)
            .await?;

        info!("cache schema ready");
        Ok(())
    }

    /// Atomically replace the latest snapshot of one metric.
    ///
    /// On any failure the transaction rolls back and the previous snapshot
    /// stays visible.
    pub async fn replace_snapshot(&self, metric: &str, rows: &[Value]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cache WHERE metric = $1")
            .bind(metric)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query("INSERT INTO cache (metric, frm_data) VALUES ($1, $2)")
                .bind(metric)
                .bind(Json(row))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Append one poll to the rolling history and trim to the retention
    /// bound, atomically.
    pub async fn record_history(
        &self,
        metric: &str,
        rows: &[Value],
        captured_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                "INSERT INTO cache_history (metric, frm_data, captured_at) VALUES ($1, $2, $3)",
            )
            .bind(metric)
            .bind(Json(row))
            .bind(captured_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            DELETE FROM cache_history
            WHERE metric = $1
              AND id NOT IN (
                SELECT id FROM cache_history
                WHERE metric = $1
                ORDER BY id DESC
                LIMIT $2
              )
            "#,
        )
        .bind(metric)
        .bind(trim_limit(self.history_depth, rows.len()))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Poll one metric route and update its snapshot (and history, when
    /// flagged). Returns the number of records cached.
    pub async fn update_metric(&self, client: &FrmClient, route: &MetricRoute) -> Result<usize> {
        let rows = client.fetch_raw(&route.path()).await?;
        self.replace_snapshot(&route.name, &rows).await?;
        if route.keep_history {
            self.record_history(&route.name, &rows, Utc::now()).await?;
        }
        Ok(rows.len())
    }
}
