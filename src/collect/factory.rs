// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Factory building collector: per-machine production plus per-circuit
//! power aggregation with the clock-speed capacity curve.

use crate::client::FrmClient;
use crate::convert::{format_label, geohash_token, map_latitude, map_longitude};
use crate::entities::BuildingDetail;
use crate::error::Result;
use crate::metrics::MetricSet;
use crate::power::{max_building_power, CircuitLoads};

pub(crate) const ROUTE: &str = "/getFactory";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<BuildingDetail> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

/// Emit per-machine production samples and fold building power draw into
/// per-circuit totals.
pub fn emit(details: &[BuildingDetail], set: &MetricSet) {
    let mut loads = CircuitLoads::new();

    for building in details {
        let lon = map_longitude(building.location.x);
        let lat = map_latitude(building.location.y);
        let token = geohash_token(lat, lon);
        let x = format_label(lon);
        let y = format_label(lat);
        let z = format_label(building.location.z);

        for prod in &building.production {
            let labels = [
                prod.name.as_str(),
                building.building.as_str(),
                token.as_str(),
                x.as_str(),
                y.as_str(),
                z.as_str(),
            ];
            set.machine_items_produced_per_min
                .with_label_values(&labels)
                .set(prod.current_prod);
            set.machine_items_produced_efficiency
                .with_label_values(&labels)
                .set(prod.prod_percent);
        }

        if let Some(power) = building.power_info {
            loads.add(
                power.circuit_id,
                power.power_consumed,
                max_building_power(&building.building, building.manu_speed),
            );
        }
    }

    for (circuit_id, load) in loads.iter() {
        let circuit = format_label(circuit_id);
        set.factory_power_consumed
            .with_label_values(&[&circuit])
            .set(load.consumed);
        set.factory_power_max_consumed
            .with_label_values(&[&circuit])
            .set(load.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Location, PowerInfo, ProductionEntry};

    fn building(kind: &str, circuit: f64, consumed: f64, clock: f64) -> BuildingDetail {
        BuildingDetail {
            building: kind.to_string(),
            manu_speed: clock,
            power_info: Some(PowerInfo {
                circuit_id: circuit,
                power_consumed: consumed,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_emit_aggregates_shared_circuit() {
        let set = MetricSet::new().unwrap();
        emit(
            &[
                building("Smelter", 1.0, 3.0, 100.0),
                building("Assembler", 1.0, 10.0, 100.0),
            ],
            &set,
        );

        let output = set.encode().unwrap();
        // 3 + 10 consumed; 4 + 15 capacity at stock clock.
        assert!(output.contains("factory_power_consumed{circuit_id=\"1\"} 13"));
        assert!(output.contains("factory_power_max_consumed{circuit_id=\"1\"} 19"));
    }

    #[test]
    fn test_emit_skips_buildings_without_circuit() {
        let set = MetricSet::new().unwrap();
        let mut detail = building("Smelter", 0.0, 5.0, 100.0);
        detail.power_info = None;
        emit(&[detail], &set);

        let output = set.encode().unwrap();
        assert!(!output.contains("factory_power_consumed"));
    }

    #[test]
    fn test_emit_production_fans_out_per_entry() {
        let set = MetricSet::new().unwrap();
        let mut detail = building("Constructor", 2.0, 4.0, 100.0);
        detail.location = Location {
            x: 10_000.0,
            y: -20_000.0,
            z: 150.0,
            rotation: 0.0,
        };
        detail.production = vec![
            ProductionEntry {
                name: "Iron Plate".to_string(),
                current_prod: 20.0,
                prod_percent: 50.0,
            },
            ProductionEntry {
                name: "Screw".to_string(),
                current_prod: 90.0,
                prod_percent: 75.0,
            },
        ];
        emit(&[detail], &set);

        let output = set.encode().unwrap();
        assert!(output.contains("item_name=\"Iron Plate\""));
        assert!(output.contains("item_name=\"Screw\""));
        assert!(output.contains("machine_name=\"Constructor\""));
        // Repeated emission of the same input is byte-identical.
        let set2 = MetricSet::new().unwrap();
        emit(
            &[building("Constructor", 2.0, 4.0, 100.0)],
            &set2,
        );
        let again = MetricSet::new().unwrap();
        emit(
            &[building("Constructor", 2.0, 4.0, 100.0)],
            &again,
        );
        assert_eq!(set2.encode().unwrap(), again.encode().unwrap());
    }

    #[test]
    fn test_emit_empty_input_emits_nothing() {
        let set = MetricSet::new().unwrap();
        emit(&[], &set);
        assert!(set.encode().unwrap().is_empty());
    }
}
