// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Per-entity-kind collection pipelines.
//!
//! Each entity kind runs `fetch -> decode -> convert -> emit` as a strictly
//! sequential pipeline; separate kinds have no data dependency on each other
//! and are polled concurrently per scrape. A failure in one kind's pipeline
//! is logged and never aborts the others.
//!
//! Every submodule splits into an async `collect` entry point (fetch + emit)
//! and a pure `emit` function over decoded records, so the mapping logic is
//! unit-testable without a live API.

pub mod drone_station;
pub mod factory;
pub mod player;
pub mod power;
pub mod production;
pub mod train;
pub mod train_station;
pub mod vehicle;
pub mod vehicle_station;

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::client::FrmClient;
use crate::error::Result;
use crate::metrics::MetricSet;

/// One category of polled object, with its own API route and JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Production,
    Power,
    FactoryBuilding,
    Vehicle,
    DroneStation,
    VehicleStation,
    Train,
    TrainStation,
    Player,
}

impl EntityKind {
    /// Every collectable kind, in catalog order.
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Production,
        EntityKind::Power,
        EntityKind::FactoryBuilding,
        EntityKind::Vehicle,
        EntityKind::DroneStation,
        EntityKind::VehicleStation,
        EntityKind::Train,
        EntityKind::TrainStation,
        EntityKind::Player,
    ];

    /// The collector name used in the `collect=` query parameter.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Production => "production",
            EntityKind::Power => "power",
            EntityKind::FactoryBuilding => "factory_building",
            EntityKind::Vehicle => "vehicle",
            EntityKind::DroneStation => "drone_station",
            EntityKind::VehicleStation => "vehicle_station",
            EntityKind::Train => "train",
            EntityKind::TrainStation => "train_station",
            EntityKind::Player => "player",
        }
    }

    /// The FRM API route suffix this kind polls.
    pub fn route(self) -> &'static str {
        match self {
            EntityKind::Production => production::ROUTE,
            EntityKind::Power => power::ROUTE,
            EntityKind::FactoryBuilding => factory::ROUTE,
            EntityKind::Vehicle => vehicle::ROUTE,
            EntityKind::DroneStation => drone_station::ROUTE,
            EntityKind::VehicleStation => vehicle_station::ROUTE,
            EntityKind::Train => train::ROUTE,
            EntityKind::TrainStation => train_station::ROUTE,
            EntityKind::Player => player::ROUTE,
        }
    }

    /// Look a kind up by collector name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Run this kind's full pipeline once: fetch, decode, and emit into the
    /// given metric set.
    pub async fn collect(self, client: &FrmClient, set: &MetricSet) -> Result<()> {
        match self {
            EntityKind::Production => production::collect(client, set).await,
            EntityKind::Power => power::collect(client, set).await,
            EntityKind::FactoryBuilding => factory::collect(client, set).await,
            EntityKind::Vehicle => vehicle::collect(client, set).await,
            EntityKind::DroneStation => drone_station::collect(client, set).await,
            EntityKind::VehicleStation => vehicle_station::collect(client, set).await,
            EntityKind::Train => train::collect(client, set).await,
            EntityKind::TrainStation => train_station::collect(client, set).await,
            EntityKind::Player => player::collect(client, set).await,
        }
    }
}

/// Resolve a `collect=` query parameter into the set of kinds to poll.
///
/// Empty or `all` selects every kind; unknown names are logged and skipped.
pub fn select_kinds(param: &str) -> Vec<EntityKind> {
    if param.is_empty() || param == "all" {
        return EntityKind::ALL.to_vec();
    }
    let mut kinds = Vec::new();
    for name in param.split(',') {
        let name = name.trim();
        match EntityKind::from_name(name) {
            Some(kind) => kinds.push(kind),
            None => warn!(collector = name, "unknown collector, skipping"),
        }
    }
    kinds
}

/// Poll the selected kinds concurrently and encode the resulting samples.
///
/// Per-kind failures are logged and swallowed; partial results from the
/// remaining kinds are still emitted.
pub async fn scrape(client: Arc<FrmClient>, kinds: Vec<EntityKind>) -> Result<String> {
    let set = Arc::new(MetricSet::new()?);

    let mut tasks = JoinSet::new();
    for kind in kinds {
        let client = Arc::clone(&client);
        let set = Arc::clone(&set);
        tasks.spawn(async move {
            if let Err(e) = kind.collect(&client, &set).await {
                warn!(collector = kind.name(), error = %e, "collection failed, skipping this cycle");
            } else {
                debug!(collector = kind.name(), "collection done");
            }
        });
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "collector task panicked");
        }
    }

    set.encode()
}
