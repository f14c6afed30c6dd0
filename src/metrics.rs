// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! The fixed catalog of measurement series.
//!
//! [`MetricSet`] owns an explicit `prometheus::Registry` plus one `GaugeVec`
//! per declared series. The catalog is fixed: it is fully declared in
//! [`MetricSet::new`] and never mutated afterwards. The exporter builds a
//! fresh set per scrape so the exposed label sets always reflect exactly the
//! current poll, with no stale series from entities that have since gone
//! away.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::error::Result;

/// One scrape's worth of gauges, all registered on a private registry.
pub struct MetricSet {
    registry: Registry,

    // Players
    pub player_position: GaugeVec,
    pub player_rotation: GaugeVec,
    pub player_health: GaugeVec,
    pub player_dead: GaugeVec,
    pub player_ping: GaugeVec,
    pub player_tag_color: GaugeVec,

    // World production statistics
    pub item_production_capacity_per_min: GaugeVec,
    pub item_production_capacity_pc: GaugeVec,
    pub item_consumption_capacity_per_min: GaugeVec,
    pub item_consumption_capacity_pc: GaugeVec,
    pub items_produced_per_min: GaugeVec,
    pub items_consumed_per_min: GaugeVec,

    // Power circuits and batteries
    pub power_consumed: GaugeVec,
    pub power_capacity: GaugeVec,
    pub power_max_consumed: GaugeVec,
    pub battery_differential: GaugeVec,
    pub battery_percent: GaugeVec,
    pub battery_capacity: GaugeVec,
    pub battery_seconds_empty: GaugeVec,
    pub battery_seconds_full: GaugeVec,
    pub fuse_triggered: GaugeVec,

    // Vehicles
    pub vehicle_fuel: GaugeVec,

    // Drone ports
    pub drone_port_battery_rate: GaugeVec,
    pub drone_port_round_trip_seconds: GaugeVec,
    pub drone_port_power: GaugeVec,
    pub drone_port_power_max: GaugeVec,

    // Truck stations
    pub vehicle_station_power: GaugeVec,
    pub vehicle_station_power_max: GaugeVec,

    // Trains
    pub train_power_consumed: GaugeVec,
    pub train_derailed: GaugeVec,
    pub train_driving_status: GaugeVec,
    pub train_forward_speed: GaugeVec,
    pub train_throttle_percent: GaugeVec,
    pub train_locomotives: GaugeVec,
    pub train_total_mass: GaugeVec,
    pub train_payload_mass: GaugeVec,
    pub train_max_payload_mass: GaugeVec,

    // Train stations
    pub train_station_power: GaugeVec,
    pub train_station_power_max: GaugeVec,

    // Factory buildings
    pub machine_items_produced_per_min: GaugeVec,
    pub machine_items_produced_efficiency: GaugeVec,
    pub factory_power_consumed: GaugeVec,
    pub factory_power_max_consumed: GaugeVec,
}

/// Create and register one gauge vector on the set's registry.
fn gauge(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> Result<GaugeVec> {
    let vec = GaugeVec::new(Opts::new(name, help), labels)?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

impl MetricSet {
    /// Declare the full catalog on a fresh registry.
    pub fn new() -> Result<Self> {
        let r = Registry::new();

        Ok(Self {
            player_position: gauge(
                &r,
                "player_current_position",
                "The current position of the player, per axis",
                &["player_name", "player_id", "axis_name"],
            )?,
            player_rotation: gauge(
                &r,
                "player_current_rotation",
                "The current rotation of the player, in degrees",
                &["player_name", "player_id"],
            )?,
            player_health: gauge(
                &r,
                "player_current_health",
                "The current health of the player",
                &["player_name", "player_id"],
            )?,
            player_dead: gauge(
                &r,
                "player_is_dead",
                "Is the player dead",
                &["player_name", "player_id"],
            )?,
            player_ping: gauge(
                &r,
                "player_current_ping",
                "The current ping of the player",
                &["player_name", "player_id"],
            )?,
            player_tag_color: gauge(
                &r,
                "player_tag_color",
                "The current tag color of the player",
                &["player_name", "player_id", "component"],
            )?,

            item_production_capacity_per_min: gauge(
                &r,
                "item_production_capacity_per_min",
                "The factory's capacity for the production of an item, per minute",
                &["item_name"],
            )?,
            item_production_capacity_pc: gauge(
                &r,
                "item_production_capacity_pc",
                "The percentage of an item's production capacity being used",
                &["item_name"],
            )?,
            item_consumption_capacity_per_min: gauge(
                &r,
                "item_consumption_capacity_per_min",
                "The factory's capacity for the consumption of an item, per minute",
                &["item_name"],
            )?,
            item_consumption_capacity_pc: gauge(
                &r,
                "item_consumption_capacity_pc",
                "The percentage of an item's consumption capacity being used",
                &["item_name"],
            )?,
            items_produced_per_min: gauge(
                &r,
                "items_produced_per_min",
                "The number of an item being produced, per minute",
                &["item_name"],
            )?,
            items_consumed_per_min: gauge(
                &r,
                "items_consumed_per_min",
                "The number of an item being consumed, per minute",
                &["item_name"],
            )?,

            power_consumed: gauge(
                &r,
                "power_consumed",
                "Power consumed on selected power circuit",
                &["circuit_id"],
            )?,
            power_capacity: gauge(
                &r,
                "power_capacity",
                "Power capacity on selected power circuit",
                &["circuit_id"],
            )?,
            power_max_consumed: gauge(
                &r,
                "power_max_consumed",
                "Maximum power that can be consumed on selected power circuit",
                &["circuit_id"],
            )?,
            battery_differential: gauge(
                &r,
                "battery_differential",
                "Amount of power in excess/deficit going into or out of the battery bank(s). \
                 Positive = charges batteries, negative = drains batteries",
                &["circuit_id"],
            )?,
            battery_percent: gauge(
                &r,
                "battery_percent",
                "Percentage of battery bank(s) charge",
                &["circuit_id"],
            )?,
            battery_capacity: gauge(
                &r,
                "battery_capacity",
                "Total capacity of battery bank(s)",
                &["circuit_id"],
            )?,
            battery_seconds_empty: gauge(
                &r,
                "battery_seconds_empty",
                "Seconds until batteries are empty",
                &["circuit_id"],
            )?,
            battery_seconds_full: gauge(
                &r,
                "battery_seconds_full",
                "Seconds until batteries are full",
                &["circuit_id"],
            )?,
            fuse_triggered: gauge(
                &r,
                "fuse_triggered",
                "Has the fuse been triggered",
                &["circuit_id"],
            )?,

            vehicle_fuel: gauge(
                &r,
                "vehicle_fuel",
                "Amount of fuel remaining",
                &["id", "vehicle_type", "fuel_type", "fuel_index"],
            )?,

            drone_port_battery_rate: gauge(
                &r,
                "drone_port_battery_rate",
                "Rate of batteries used",
                &["id", "home_station", "paired_station"],
            )?,
            drone_port_round_trip_seconds: gauge(
                &r,
                "drone_port_round_trip_seconds",
                "Recorded drone round trip time in seconds",
                &["id", "home_station", "paired_station"],
            )?,
            drone_port_power: gauge(
                &r,
                "drone_port_power",
                "Drone port power in MW",
                &["circuit_id"],
            )?,
            drone_port_power_max: gauge(
                &r,
                "drone_port_power_max",
                "Drone port max power use in MW",
                &["circuit_id"],
            )?,

            vehicle_station_power: gauge(
                &r,
                "vehicle_station_power",
                "Vehicle station power use in MW",
                &["circuit_id"],
            )?,
            vehicle_station_power_max: gauge(
                &r,
                "vehicle_station_power_max",
                "Vehicle station max power use in MW",
                &["circuit_id"],
            )?,

            train_power_consumed: gauge(
                &r,
                "train_power_consumed",
                "How much power the train is consuming",
                &["name"],
            )?,
            train_derailed: gauge(&r, "train_derailed", "Is the train derailed", &["name"])?,
            train_driving_status: gauge(
                &r,
                "train_driving_status",
                "The current autopilot status of the train. \
                 0 = Parked, 1 = Manual Driving, 2 = Self-Driving, -1 = unknown",
                &["name"],
            )?,
            train_forward_speed: gauge(
                &r,
                "train_forward_speed",
                "The current forward speed of the train",
                &["name"],
            )?,
            train_throttle_percent: gauge(
                &r,
                "train_throttle_percent",
                "The current throttle percentage of the train",
                &["name"],
            )?,
            train_locomotives: gauge(
                &r,
                "train_locomotives",
                "The number of locomotives on the train",
                &["name"],
            )?,
            train_total_mass: gauge(
                &r,
                "train_total_mass",
                "Total mass of the train",
                &["name"],
            )?,
            train_payload_mass: gauge(
                &r,
                "train_payload_mass",
                "Current payload mass of the train",
                &["name"],
            )?,
            train_max_payload_mass: gauge(
                &r,
                "train_max_payload_mass",
                "Max payload mass of the train",
                &["name"],
            )?,

            train_station_power: gauge(
                &r,
                "train_station_power",
                "Train station power consumed in MW",
                &["circuit_id"],
            )?,
            train_station_power_max: gauge(
                &r,
                "train_station_power_max",
                "Train station max power consumed in MW",
                &["circuit_id"],
            )?,

            machine_items_produced_per_min: gauge(
                &r,
                "machine_items_produced_per_min",
                "The number of an item produced by one machine, per minute",
                &["item_name", "machine_name", "geohash", "x", "y", "z"],
            )?,
            machine_items_produced_efficiency: gauge(
                &r,
                "machine_items_produced_efficiency",
                "The production efficiency of one machine, in percent",
                &["item_name", "machine_name", "geohash", "x", "y", "z"],
            )?,
            factory_power_consumed: gauge(
                &r,
                "factory_power_consumed",
                "Power consumed by factory buildings on selected power circuit",
                &["circuit_id"],
            )?,
            factory_power_max_consumed: gauge(
                &r,
                "factory_power_max_consumed",
                "Maximum power factory buildings can consume on selected power circuit",
                &["circuit_id"],
            )?,

            registry: r,
        })
    }

    /// Encode every registered series to the Prometheus text exposition
    /// format.
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
