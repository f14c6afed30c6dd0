// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Train station collector: per-circuit station power including attached
//! cargo platforms.

use crate::client::FrmClient;
use crate::convert::format_label;
use crate::entities::TrainStationDetails;
use crate::error::Result;
use crate::metrics::MetricSet;
use crate::power::{
    CircuitLoads, CARGO_PLATFORM_POWER, IDLE_PLATFORM_POWER, TRAIN_STATION_POWER,
};

pub(crate) const ROUTE: &str = "/getTrainStation";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<TrainStationDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[TrainStationDetails], set: &MetricSet) {
    let mut loads = CircuitLoads::new();

    for d in details {
        let Some(power) = d.power_info else {
            continue;
        };

        // The API only reports the station head's own draw; each cargo
        // platform adds 0.1 MW when idle, full platform power otherwise.
        let mut consumed = power.power_consumed;
        let mut capacity = TRAIN_STATION_POWER;
        for platform in &d.cargo_platforms {
            capacity += CARGO_PLATFORM_POWER;
            if platform.loading_status == "Idle" {
                consumed += IDLE_PLATFORM_POWER;
            } else {
                consumed += CARGO_PLATFORM_POWER;
            }
        }

        loads.add(power.circuit_id, consumed, capacity);
    }

    for (circuit_id, load) in loads.iter() {
        let circuit = format_label(circuit_id);
        set.train_station_power
            .with_label_values(&[&circuit])
            .set(load.consumed);
        set.train_station_power_max
            .with_label_values(&[&circuit])
            .set(load.capacity);
    }
}
