// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Vehicle collector: per-slot fuel levels.

use crate::client::FrmClient;
use crate::entities::VehicleDetails;
use crate::error::Result;
use crate::metrics::MetricSet;

pub(crate) const ROUTE: &str = "/getVehicles";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<VehicleDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[VehicleDetails], set: &MetricSet) {
    for d in details {
        for (index, fuel) in d.fuel.iter().enumerate() {
            set.vehicle_fuel
                .with_label_values(&[
                    d.id.as_str(),
                    d.vehicle_type.as_str(),
                    fuel.name.as_str(),
                    index.to_string().as_str(),
                ])
                .set(fuel.amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Fuel;

    #[test]
    fn test_emit_indexed_fuel_slots() {
        let set = MetricSet::new().unwrap();
        emit(
            &[VehicleDetails {
                id: "truck-7".to_string(),
                vehicle_type: "Truck".to_string(),
                fuel: vec![
                    Fuel {
                        name: "Coal".to_string(),
                        amount: 42.0,
                    },
                    Fuel {
                        name: "Coal".to_string(),
                        amount: 13.0,
                    },
                ],
                ..Default::default()
            }],
            &set,
        );

        let output = set.encode().unwrap();
        assert!(output.contains(
            "vehicle_fuel{fuel_index=\"0\",fuel_type=\"Coal\",id=\"truck-7\",vehicle_type=\"Truck\"} 42"
        ));
        assert!(output.contains("fuel_index=\"1\""));
    }

    #[test]
    fn test_emit_vehicle_without_fuel() {
        let set = MetricSet::new().unwrap();
        emit(
            &[VehicleDetails {
                id: "tractor-1".to_string(),
                ..Default::default()
            }],
            &set,
        );
        assert!(set.encode().unwrap().is_empty());
    }
}
