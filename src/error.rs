// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Error types for the FRM telemetry pipeline.

use thiserror::Error;

/// Main error type for exporter and cache operations.
#[derive(Error, Debug)]
pub enum FrmError {
    /// Transport failure talking to the FRM API (unreachable, timeout).
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Payload shape the decoder does not accept. The documented "no data"
    /// shape (a single empty object) is *not* an error and never produces
    /// this variant.
    #[error("unexpected payload from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Database failure; the enclosing transaction has been rolled back.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Gauge registration failure while building a metric set.
    #[error("metric registration failed: {0}")]
    Registry(#[from] prometheus::Error),

    /// Invalid metric-route configuration file.
    #[error("invalid metrics file: {0}")]
    MetricsFile(String),
}

/// Result type alias for exporter and cache operations.
pub type Result<T> = std::result::Result<T, FrmError>;
