// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Truck station collector: per-circuit station power with a flat per-unit
//! maximum.

use crate::client::FrmClient;
use crate::convert::format_label;
use crate::entities::VehicleStationDetails;
use crate::error::Result;
use crate::metrics::MetricSet;
use crate::power::{CircuitLoads, TRUCK_STATION_POWER};

pub(crate) const ROUTE: &str = "/getTruckStation";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<VehicleStationDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[VehicleStationDetails], set: &MetricSet) {
    let mut loads = CircuitLoads::new();

    for d in details {
        if let Some(power) = d.power_info {
            loads.add(power.circuit_id, power.power_consumed, TRUCK_STATION_POWER);
        }
    }

    for (circuit_id, load) in loads.iter() {
        let circuit = format_label(circuit_id);
        set.vehicle_station_power
            .with_label_values(&[&circuit])
            .set(load.consumed);
        set.vehicle_station_power_max
            .with_label_values(&[&circuit])
            .set(load.capacity);
    }
}
