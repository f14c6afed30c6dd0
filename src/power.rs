// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Power-circuit aggregation and building capacity curves.
//!
//! Every powered entity reports its instantaneous draw and the identifier of
//! the circuit it is attached to. Per poll, each collector folds its entities
//! into a [`CircuitLoads`] map: actual draw summed per circuit, alongside the
//! theoretical maximum draw derived from the building's capacity curve or a
//! flat per-unit constant.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Clock-speed power-law exponent, log2(2.5).
///
/// Production-building power draw scales with `(clock / 100) ^ 1.321928`;
/// see the in-game clock speed mechanics for the derivation.
pub const CLOCK_SPEED_EXPONENT: f64 = 1.321928;

/// Base power draw of a truck station, in MW.
pub const TRUCK_STATION_POWER: f64 = 20.0;

/// Base power draw of a train station, in MW.
/// Should be 50, but the upstream API currently reports against 0.1.
pub const TRAIN_STATION_POWER: f64 = 0.1;

/// Power draw of a cargo platform while loading or unloading, in MW.
pub const CARGO_PLATFORM_POWER: f64 = 50.0;

/// Power draw of an idle cargo platform, in MW.
pub const IDLE_PLATFORM_POWER: f64 = 0.1;

/// Flat theoretical maximum draw of a drone port, in MW.
pub const DRONE_PORT_POWER: f64 = 100.0;

/// Base wattage (MW at 100% clock speed) for a production building kind.
///
/// The table is closed: kinds not listed draw 0 towards circuit capacity.
pub fn base_power(building: &str) -> f64 {
    match building {
        "Smelter" => 4.0,
        "Constructor" => 4.0,
        "Assembler" => 15.0,
        "Manufacturer" => 55.0,
        "Refinery" => 30.0,
        "Blender" => 75.0,
        "Particle Accelerator" => 500.0,
        _ => 0.0,
    }
}

/// Theoretical maximum draw of a production building at the given clock
/// speed percentage.
pub fn max_building_power(building: &str, clock_percent: f64) -> f64 {
    base_power(building) * (clock_percent / 100.0).powf(CLOCK_SPEED_EXPONENT)
}

/// A power-circuit identifier.
///
/// The API reports circuit ids as JSON numbers; this newtype makes the raw
/// `f64` usable as a map key by hashing and comparing its bit pattern.
#[derive(Debug, Clone, Copy)]
pub struct CircuitId(pub f64);

impl PartialEq for CircuitId {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for CircuitId {}

impl Hash for CircuitId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Accumulated load on one circuit: actual draw and theoretical maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CircuitLoad {
    /// Sum of each member's instantaneous draw, in MW.
    pub consumed: f64,
    /// Sum of each member's theoretical maximum draw, in MW.
    pub capacity: f64,
}

/// Per-circuit load totals for one entity kind in one poll.
///
/// Circuits absent from the source data are absent from the map; there are
/// no implicit zero entries. Iteration order is unspecified, so consumers
/// must treat the contents as an unordered set of (id, load) pairs.
#[derive(Debug, Default)]
pub struct CircuitLoads {
    loads: HashMap<CircuitId, CircuitLoad>,
}

impl CircuitLoads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entity's draw and maximum draw to its circuit's totals.
    pub fn add(&mut self, circuit_id: f64, consumed: f64, capacity: f64) {
        let load = self.loads.entry(CircuitId(circuit_id)).or_default();
        load.consumed += consumed;
        load.capacity += capacity;
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn get(&self, circuit_id: f64) -> Option<CircuitLoad> {
        self.loads.get(&CircuitId(circuit_id)).copied()
    }

    /// Iterate over (circuit id, load) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, CircuitLoad)> + '_ {
        self.loads.iter().map(|(id, load)| (id.0, *load))
    }
}
