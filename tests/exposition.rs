// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! End-to-end pipeline tests: canned API payloads through decode, convert,
//! aggregate, and emit, checked against the text exposition output.

use frm_exporter::client::decode_payload;
use frm_exporter::collect;
use frm_exporter::entities::{BuildingDetail, PlayerDetails, PowerDetails, TrainDetails};
use frm_exporter::MetricSet;

const FACTORY_BODY: &str = r#"[
    {
        "building": "Assembler",
        "location": {"x": 12000.0, "y": -34000.0, "z": 210.0, "rotation": 90.0},
        "ManuSpeed": 150.0,
        "production": [
            {"Name": "Reinforced Iron Plate", "CurrentProd": 5.0, "ProdPercent": 100.0}
        ],
        "PowerInfo": {"CircuitID": 1, "PowerConsumed": 22.0}
    },
    {
        "building": "Smelter",
        "location": {"x": 500.0, "y": 700.0, "z": 100.0, "rotation": 0.0},
        "ManuSpeed": 100.0,
        "production": [],
        "PowerInfo": {"CircuitID": 1, "PowerConsumed": 4.0}
    }
]"#;

const POWER_BODY: &str = r#"[
    {
        "CircuitID": 1,
        "PowerConsumed": 26.0,
        "PowerCapacity": 100.0,
        "PowerMaxConsumed": 41.0,
        "BatteryDifferential": -2.0,
        "BatteryPercent": 80.0,
        "BatteryCapacity": 100.0,
        "BatteryTimeEmpty": "00:41:12",
        "BatteryTimeFull": "",
        "FuseTriggered": false
    }
]"#;

const TRAIN_BODY: &str = r#"[
    {
        "Name": "Iron Line",
        "PowerConsumed": 25.0,
        "Derailed": false,
        "Status": "Self-Driving",
        "TrainConsist": [
            {"Name": "Electric Locomotive"},
            {"Name": "Freight Car"}
        ],
        "ForwardSpeed": 88.0,
        "ThrottlePercent": 100.0,
        "TotalMass": 300000.0,
        "PayloadMass": 40000.0,
        "MaxPayloadMass": 70000.0
    }
]"#;

const PLAYER_BODY: &str = r#"[
    {
        "ID": 1,
        "PlayerName": "pioneer",
        "PlayerHP": 100.0,
        "Dead": false,
        "PingTime": 23.0,
        "Location": {"x": 0.0, "y": 0.0, "z": 150.0, "rotation": 45.0},
        "TagColor": {"R": 1.0, "G": 0.5, "B": 0.0, "A": 1.0}
    }
]"#;

/// Find the exposition line for the series with the given name whose label
/// set carries every `key="value"` pair, treating the labels as unordered.
///
/// The text encoder writes labels in alphabetical order; nothing here may
/// depend on that, so matching is by fragment, not by prefix.
fn find_series<'a>(output: &'a str, name: &str, labels: &[(&str, &str)]) -> Option<&'a str> {
    output
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find(|line| {
            let rest = match line.strip_prefix(name) {
                Some(rest) => rest,
                None => return false,
            };
            // Exact series name only, not a longer name sharing the prefix.
            if !rest.starts_with('{') && !rest.starts_with(' ') {
                return false;
            }
            labels
                .iter()
                .all(|(key, value)| rest.contains(&format!("{key}=\"{value}\"")))
        })
}

/// Parse the sample value of a series located by name and unordered labels.
fn sample_value(output: &str, name: &str, labels: &[(&str, &str)]) -> f64 {
    let line = find_series(output, name, labels)
        .unwrap_or_else(|| panic!("no series {name} with labels {labels:?}"));
    line.rsplit(' ').next().unwrap().parse().unwrap()
}

#[test]
fn test_full_poll_exposition() {
    let set = MetricSet::new().unwrap();

    let buildings: Vec<BuildingDetail> = decode_payload("t", FACTORY_BODY).unwrap();
    let circuits: Vec<PowerDetails> = decode_payload("t", POWER_BODY).unwrap();
    let trains: Vec<TrainDetails> = decode_payload("t", TRAIN_BODY).unwrap();
    let players: Vec<PlayerDetails> = decode_payload("t", PLAYER_BODY).unwrap();

    collect::factory::emit(&buildings, &set);
    collect::power::emit(&circuits, &set);
    collect::train::emit(&trains, &set);
    collect::player::emit(&players, &set);

    let output = set.encode().unwrap();
    let circuit = [("circuit_id", "1")];

    // Factory: both buildings share circuit 1; 22 + 4 consumed,
    // 15 * 1.5^1.321928 + 4 capacity.
    assert_eq!(sample_value(&output, "factory_power_consumed", &circuit), 26.0);
    let capacity = sample_value(&output, "factory_power_max_consumed", &circuit);
    let expected = 15.0 * 1.5_f64.powf(1.321928) + 4.0;
    assert!((capacity - expected).abs() / expected < 1e-9);

    // Machine production carries the geohash location label.
    let machine = find_series(
        &output,
        "machine_items_produced_per_min",
        &[
            ("item_name", "Reinforced Iron Plate"),
            ("machine_name", "Assembler"),
        ],
    )
    .expect("machine production series present");
    assert!(machine.contains("geohash=\""));
    assert_eq!(
        sample_value(
            &output,
            "machine_items_produced_per_min",
            &[("item_name", "Reinforced Iron Plate")],
        ),
        5.0
    );

    // Power circuit and battery state.
    assert_eq!(sample_value(&output, "power_consumed", &circuit), 26.0);
    assert_eq!(sample_value(&output, "battery_seconds_empty", &circuit), 2472.0);
    assert!(find_series(&output, "battery_seconds_full", &circuit).is_none());
    assert_eq!(sample_value(&output, "fuse_triggered", &circuit), 0.0);

    // Train: one locomotive, self-driving.
    let train = [("name", "Iron Line")];
    assert_eq!(sample_value(&output, "train_power_consumed", &train), 25.0);
    assert_eq!(sample_value(&output, "train_driving_status", &train), 2.0);
    assert_eq!(sample_value(&output, "train_locomotives", &train), 1.0);

    // Player: three position axes.
    let player = [("player_id", "1"), ("player_name", "pioneer")];
    for axis in ["X", "Y", "Z"] {
        assert!(find_series(
            &output,
            "player_current_position",
            &[("player_name", "pioneer"), ("axis_name", axis)],
        )
        .is_some());
    }
    assert_eq!(sample_value(&output, "player_current_health", &player), 100.0);
}

#[test]
fn test_empty_upstream_payloads_emit_nothing() {
    let set = MetricSet::new().unwrap();

    let buildings: Vec<BuildingDetail> = decode_payload("t", "{}").unwrap();
    let trains: Vec<TrainDetails> = decode_payload("t", "{}").unwrap();
    collect::factory::emit(&buildings, &set);
    collect::train::emit(&trains, &set);

    assert!(set.encode().unwrap().is_empty());
}

#[test]
fn test_one_kind_failing_leaves_others_intact() {
    let set = MetricSet::new().unwrap();

    // Train payload is malformed; power decodes fine. The scrape layer
    // skips the broken kind and still emits the rest.
    let trains: Result<Vec<TrainDetails>, _> = decode_payload("t", "[{\"Name\": 3}]");
    assert!(trains.is_err());

    let circuits: Vec<PowerDetails> = decode_payload("t", POWER_BODY).unwrap();
    collect::power::emit(&circuits, &set);

    let output = set.encode().unwrap();
    assert_eq!(
        sample_value(&output, "power_consumed", &[("circuit_id", "1")]),
        26.0
    );
}

#[test]
fn test_series_lookup_ignores_label_order() {
    // The machine production series carries six labels; a lookup must find
    // it no matter where a queried label lands in the encoded line.
    let set = MetricSet::new().unwrap();
    let buildings: Vec<BuildingDetail> = decode_payload("t", FACTORY_BODY).unwrap();
    collect::factory::emit(&buildings, &set);

    let output = set.encode().unwrap();
    let forward = [
        ("item_name", "Reinforced Iron Plate"),
        ("machine_name", "Assembler"),
    ];
    let reversed = [
        ("machine_name", "Assembler"),
        ("item_name", "Reinforced Iron Plate"),
    ];
    assert_eq!(
        find_series(&output, "machine_items_produced_per_min", &forward),
        find_series(&output, "machine_items_produced_per_min", &reversed),
    );
    assert!(find_series(&output, "machine_items_produced_per_min", &forward).is_some());
}
