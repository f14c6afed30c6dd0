// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! World production statistics collector.

use crate::client::FrmClient;
use crate::entities::ProductionDetails;
use crate::error::Result;
use crate::metrics::MetricSet;

pub(crate) const ROUTE: &str = "/getProdStats";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<ProductionDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[ProductionDetails], set: &MetricSet) {
    for d in details {
        let labels = [d.item_name.as_str()];
        set.items_produced_per_min
            .with_label_values(&labels)
            .set(d.current_production);
        set.items_consumed_per_min
            .with_label_values(&labels)
            .set(d.current_consumption);
        set.item_production_capacity_pc
            .with_label_values(&labels)
            .set(d.prod_percent);
        set.item_consumption_capacity_pc
            .with_label_values(&labels)
            .set(d.cons_percent);
        set.item_production_capacity_per_min
            .with_label_values(&labels)
            .set(d.max_prod);
        set.item_consumption_capacity_per_min
            .with_label_values(&labels)
            .set(d.max_consumed);
    }
}
