// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Power circuit collector: per-circuit draw, capacity, and battery state.

use crate::client::FrmClient;
use crate::convert::{bool_gauge, format_label, parse_time_seconds};
use crate::entities::PowerDetails;
use crate::error::Result;
use crate::metrics::MetricSet;

pub(crate) const ROUTE: &str = "/getPower";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<PowerDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[PowerDetails], set: &MetricSet) {
    for d in details {
        let circuit = format_label(d.circuit_id);
        let labels = [circuit.as_str()];

        set.power_consumed.with_label_values(&labels).set(d.power_consumed);
        set.power_capacity.with_label_values(&labels).set(d.power_capacity);
        set.power_max_consumed
            .with_label_values(&labels)
            .set(d.power_max_consumed);
        set.battery_differential
            .with_label_values(&labels)
            .set(d.battery_differential);
        set.battery_percent.with_label_values(&labels).set(d.battery_percent);
        set.battery_capacity
            .with_label_values(&labels)
            .set(d.battery_capacity);

        // Countdown strings only carry a duration while the battery bank is
        // actually draining or charging; no sample otherwise.
        if let Some(seconds) = parse_time_seconds(&d.battery_time_empty) {
            set.battery_seconds_empty.with_label_values(&labels).set(seconds);
        }
        if let Some(seconds) = parse_time_seconds(&d.battery_time_full) {
            set.battery_seconds_full.with_label_values(&labels).set(seconds);
        }

        set.fuse_triggered
            .with_label_values(&labels)
            .set(bool_gauge(d.fuse_triggered));
    }
}
