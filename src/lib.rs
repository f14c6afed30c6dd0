// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! # FRM Exporter
//!
//! Telemetry pipeline for the Ficsit Remote Monitoring (FRM) API: polls the
//! live state of a Satisfactory world (buildings, power circuits, vehicles,
//! trains, players) and re-exposes it as normalized numeric measurements.
//!
//! Two consumers share this library:
//!
//! - the `frm-exporter` binary, a pull-based Prometheus exporter that polls
//!   the API on every scrape and answers in text exposition format;
//! - the `frm-cache` binary, a bounded-history relational cache that mirrors
//!   raw API payloads into a latest-snapshot table and a depth-bounded
//!   rolling-history table in Postgres.
//!
//! ## Pipeline
//!
//! ```text
//! FRM API -> FrmClient (fetch + decode) -> entities
//!          -> convert (units, projections) ---+
//!          -> power (circuit aggregation) ----+-> MetricSet (gauges)
//! FRM API -> FrmClient (raw records) ----------> MetricCache (Postgres)
//! ```

pub mod cache;
pub mod client;
pub mod collect;
pub mod convert;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod power;

pub use client::FrmClient;
pub use collect::EntityKind;
pub use error::{FrmError, Result};
pub use metrics::MetricSet;
