// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Typed entity records decoded from FRM API payloads.
//!
//! Every record is immutable once decoded and lives for a single poll cycle.
//! Field presence is best-effort: all scalar fields default to the numeric,
//! boolean, or empty-string zero value when missing from the payload. The
//! one deliberate exception is the power-circuit reference, which stays
//! `Option<PowerInfo>` so that an entity with no circuit reference never
//! shows up in a circuit aggregate as a phantom circuit 0.
//!
//! The API has drifted on field-name casing across endpoints (`location` vs
//! `Location`); serde aliases absorb both spellings.

use serde::Deserialize;

/// A world-space position: three axes plus an optional rotation in degrees.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(rename = "x", alias = "X")]
    pub x: f64,
    #[serde(rename = "y", alias = "Y")]
    pub y: f64,
    #[serde(rename = "z", alias = "Z")]
    pub z: f64,
    #[serde(rename = "rotation", alias = "Rotation")]
    pub rotation: f64,
}

/// An entity's power-circuit membership: which circuit, and how much it is
/// drawing right now.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PowerInfo {
    #[serde(rename = "CircuitID", alias = "ID", alias = "CircuitId")]
    pub circuit_id: f64,
    #[serde(rename = "PowerConsumed")]
    pub power_consumed: f64,
}

/// One production line of a factory building.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CurrentProd")]
    pub current_prod: f64,
    #[serde(rename = "ProdPercent")]
    pub prod_percent: f64,
}

/// A factory building record from `/getFactory`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildingDetail {
    #[serde(rename = "building", alias = "Building")]
    pub building: String,
    #[serde(rename = "location", alias = "Location")]
    pub location: Location,
    /// Clock speed as a percentage; 100.0 is stock throughput.
    #[serde(rename = "ManuSpeed")]
    pub manu_speed: f64,
    #[serde(rename = "production", alias = "Production")]
    pub production: Vec<ProductionEntry>,
    #[serde(rename = "PowerInfo")]
    pub power_info: Option<PowerInfo>,
}

/// A power-circuit record from `/getPower`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PowerDetails {
    #[serde(rename = "CircuitID", alias = "CircuitId")]
    pub circuit_id: f64,
    #[serde(rename = "PowerConsumed")]
    pub power_consumed: f64,
    #[serde(rename = "PowerCapacity")]
    pub power_capacity: f64,
    #[serde(rename = "PowerMaxConsumed")]
    pub power_max_consumed: f64,
    #[serde(rename = "BatteryDifferential")]
    pub battery_differential: f64,
    #[serde(rename = "BatteryPercent")]
    pub battery_percent: f64,
    #[serde(rename = "BatteryCapacity")]
    pub battery_capacity: f64,
    /// Free-form countdown string, e.g. "00:41:12"; may be empty.
    #[serde(rename = "BatteryTimeEmpty")]
    pub battery_time_empty: String,
    #[serde(rename = "BatteryTimeFull")]
    pub battery_time_full: String,
    #[serde(rename = "FuseTriggered")]
    pub fuse_triggered: bool,
}

/// A per-item production statistic from `/getProdStats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductionDetails {
    #[serde(rename = "Name")]
    pub item_name: String,
    #[serde(rename = "ProdPercent")]
    pub prod_percent: f64,
    #[serde(rename = "ConsPercent")]
    pub cons_percent: f64,
    #[serde(rename = "CurrentProd")]
    pub current_production: f64,
    #[serde(rename = "CurrentConsumed")]
    pub current_consumption: f64,
    #[serde(rename = "MaxProd")]
    pub max_prod: f64,
    #[serde(rename = "MaxConsumed")]
    pub max_consumed: f64,
}

/// One car in a train consist.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainCar {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "TotalMass")]
    pub total_mass: f64,
    #[serde(rename = "PayloadMass")]
    pub payload_mass: f64,
    #[serde(rename = "MaxPayloadMass")]
    pub max_payload_mass: f64,
}

/// A train record from `/getTrains`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainDetails {
    #[serde(rename = "Name")]
    pub train_name: String,
    #[serde(rename = "PowerConsumed")]
    pub power_consumed: f64,
    #[serde(rename = "TrainStation")]
    pub train_station: String,
    #[serde(rename = "Derailed")]
    pub derailed: bool,
    /// Autopilot status string: "Parked", "Manual Driving", "Self-Driving".
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "TrainConsist")]
    pub train_consist: Vec<TrainCar>,
    #[serde(rename = "ForwardSpeed")]
    pub forward_speed: f64,
    #[serde(rename = "ThrottlePercent")]
    pub throttle_percent: f64,
    #[serde(rename = "TotalMass")]
    pub total_mass: f64,
    #[serde(rename = "PayloadMass")]
    pub payload_mass: f64,
    #[serde(rename = "MaxPayloadMass")]
    pub max_payload_mass: f64,
}

/// A loading dock attached to a train station.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CargoPlatform {
    #[serde(rename = "LoadingDock")]
    pub loading_dock: String,
    #[serde(rename = "TransferRate")]
    pub transfer_rate: f64,
    /// "Idle", "Loading", or "Unloading".
    #[serde(rename = "LoadingStatus")]
    pub loading_status: String,
    #[serde(rename = "LoadingMode")]
    pub loading_mode: String,
}

/// A train station record from `/getTrainStation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrainStationDetails {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "location", alias = "Location")]
    pub location: Location,
    #[serde(rename = "CargoPlatforms")]
    pub cargo_platforms: Vec<CargoPlatform>,
    #[serde(rename = "PowerInfo")]
    pub power_info: Option<PowerInfo>,
}

/// A drone port record from `/getDroneStation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DroneStationDetails {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub home_station: String,
    #[serde(rename = "PairedStation")]
    pub paired_station: String,
    #[serde(rename = "DroneStatus")]
    pub drone_status: String,
    /// Free-form round-trip duration string, e.g. "00:03:41".
    #[serde(rename = "LatestRndTrip")]
    pub latest_rnd_trip: String,
    #[serde(rename = "EstBatteryRate")]
    pub est_battery_rate: f64,
    #[serde(rename = "PowerInfo")]
    pub power_info: Option<PowerInfo>,
}

/// One fuel slot of a vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fuel {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

/// A vehicle record from `/getVehicles`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleDetails {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub vehicle_type: String,
    #[serde(rename = "location", alias = "Location")]
    pub location: Location,
    #[serde(rename = "ForwardSpeed")]
    pub forward_speed: f64,
    #[serde(rename = "AutoPilot")]
    pub auto_pilot: bool,
    #[serde(rename = "Fuel")]
    pub fuel: Vec<Fuel>,
    #[serde(rename = "PathName")]
    pub path_name: String,
}

/// A truck station record from `/getTruckStation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleStationDetails {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "location", alias = "Location")]
    pub location: Location,
    #[serde(rename = "PowerInfo")]
    pub power_info: Option<PowerInfo>,
}

/// A player's map-tag color components.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct TagColor {
    #[serde(rename = "R")]
    pub r: f64,
    #[serde(rename = "G")]
    pub g: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "A")]
    pub a: f64,
}

/// A player record from `/getPlayer`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerDetails {
    #[serde(rename = "ID")]
    pub id: f64,
    #[serde(rename = "PlayerName")]
    pub player_name: String,
    #[serde(rename = "PlayerHP")]
    pub player_hp: f64,
    #[serde(rename = "Dead")]
    pub dead: bool,
    #[serde(rename = "PingTime")]
    pub ping_time: f64,
    #[serde(rename = "Location", alias = "location")]
    pub location: Location,
    #[serde(rename = "TagColor")]
    pub tag_color: TagColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_missing_fields_default() {
        let raw = r#"{"building": "Smelter"}"#;
        let detail: BuildingDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.building, "Smelter");
        assert_eq!(detail.manu_speed, 0.0);
        assert!(detail.production.is_empty());
        assert!(detail.power_info.is_none());
    }

    #[test]
    fn test_building_with_power_info() {
        let raw = r#"{
            "building": "Assembler",
            "ManuSpeed": 150.0,
            "PowerInfo": {"CircuitID": 3, "PowerConsumed": 12.5}
        }"#;
        let detail: BuildingDetail = serde_json::from_str(raw).unwrap();
        let power = detail.power_info.unwrap();
        assert_eq!(power.circuit_id, 3.0);
        assert_eq!(power.power_consumed, 12.5);
    }

    #[test]
    fn test_location_case_aliases() {
        let lower: VehicleDetails =
            serde_json::from_str(r#"{"location": {"x": 1.0, "y": 2.0, "z": 3.0}}"#).unwrap();
        let upper: VehicleDetails =
            serde_json::from_str(r#"{"Location": {"x": 1.0, "y": 2.0, "z": 3.0}}"#).unwrap();
        assert_eq!(lower.location.x, upper.location.x);
        assert_eq!(lower.location.z, 3.0);
    }

    #[test]
    fn test_power_info_legacy_id_alias() {
        let info: PowerInfo = serde_json::from_str(r#"{"ID": 7, "PowerConsumed": 1.0}"#).unwrap();
        assert_eq!(info.circuit_id, 7.0);
    }

    #[test]
    fn test_player_defaults() {
        let player: PlayerDetails = serde_json::from_str(r#"{"PlayerName": "pioneer"}"#).unwrap();
        assert_eq!(player.player_name, "pioneer");
        assert!(!player.dead);
        assert_eq!(player.tag_color.r, 0.0);
    }
}
