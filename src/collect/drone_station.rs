// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Drone port collector: pairing statistics and per-circuit port power.

use crate::client::FrmClient;
use crate::convert::{format_label, parse_time_seconds};
use crate::entities::DroneStationDetails;
use crate::error::Result;
use crate::metrics::MetricSet;
use crate::power::{CircuitLoads, DRONE_PORT_POWER};

pub(crate) const ROUTE: &str = "/getDroneStation";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<DroneStationDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[DroneStationDetails], set: &MetricSet) {
    let mut loads = CircuitLoads::new();

    for d in details {
        let labels = [
            d.id.as_str(),
            d.home_station.as_str(),
            d.paired_station.as_str(),
        ];

        set.drone_port_battery_rate
            .with_label_values(&labels)
            .set(d.est_battery_rate);

        // No round trip recorded yet means no sample, not zero.
        if let Some(seconds) = parse_time_seconds(&d.latest_rnd_trip) {
            set.drone_port_round_trip_seconds
                .with_label_values(&labels)
                .set(seconds);
        }

        if let Some(power) = d.power_info {
            loads.add(power.circuit_id, power.power_consumed, DRONE_PORT_POWER);
        }
    }

    for (circuit_id, load) in loads.iter() {
        let circuit = format_label(circuit_id);
        set.drone_port_power
            .with_label_values(&[&circuit])
            .set(load.consumed);
        set.drone_port_power_max
            .with_label_values(&[&circuit])
            .set(load.capacity);
    }
}
