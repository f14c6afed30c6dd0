// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Train collector: per-train power, mass, speed, and autopilot status.

use tracing::warn;

use crate::client::FrmClient;
use crate::convert::bool_gauge;
use crate::entities::TrainDetails;
use crate::error::Result;
use crate::metrics::MetricSet;

pub(crate) const ROUTE: &str = "/getTrains";

/// Consist car name that counts as a powered unit.
const LOCOMOTIVE_NAME: &str = "Electric Locomotive";

/// Sentinel sample value for an unrecognized status string.
const UNKNOWN_STATUS: f64 = -1.0;

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<TrainDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[TrainDetails], set: &MetricSet) {
    for d in details {
        let labels = [d.train_name.as_str()];

        let locomotives = d
            .train_consist
            .iter()
            .filter(|car| car.name == LOCOMOTIVE_NAME)
            .count() as f64;

        // The API reports the draw of a single locomotive; scale by the
        // consist's locomotive count for the train's total.
        set.train_power_consumed
            .with_label_values(&labels)
            .set(d.power_consumed * locomotives);

        set.train_total_mass.with_label_values(&labels).set(d.total_mass);
        set.train_payload_mass
            .with_label_values(&labels)
            .set(d.payload_mass);
        set.train_max_payload_mass
            .with_label_values(&labels)
            .set(d.max_payload_mass);
        set.train_derailed
            .with_label_values(&labels)
            .set(bool_gauge(d.derailed));
        set.train_forward_speed
            .with_label_values(&labels)
            .set(d.forward_speed);
        set.train_throttle_percent
            .with_label_values(&labels)
            .set(d.throttle_percent);
        set.train_locomotives.with_label_values(&labels).set(locomotives);

        let status = match d.status.as_str() {
            "Parked" => 0.0,
            "Manual Driving" => 1.0,
            "Self-Driving" => 2.0,
            other => {
                warn!(train = %d.train_name, status = other, "unknown train status");
                UNKNOWN_STATUS
            }
        };
        set.train_driving_status.with_label_values(&labels).set(status);
    }
}
