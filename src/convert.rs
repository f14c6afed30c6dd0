// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Unit and derived-value conversions.
//!
//! Raw FRM fields arrive as free-form strings, booleans, and world-space
//! coordinates. This module turns them into the numeric measurements the
//! emission layer exposes: durations in seconds, booleans as {0,1} gauges,
//! world positions as latitude/longitude pairs with a geohash location
//! token, and deterministic label strings.

use geohash::Coord;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(r"(\d\d):(\d\d):(\d\d)").unwrap();
}

/// World-X to longitude: fixed affine projection onto the community map.
const MAP_LON_SCALE: f64 = 0.0002400052604;
const MAP_LON_OFFSET: f64 = -79.56302209;

/// World-Y to latitude. The Y axis is mirrored, hence the negative scale.
const MAP_LAT_SCALE: f64 = -0.0001673061871;
const MAP_LAT_OFFSET: f64 = 43.71230201;

/// Player minimap projection constants (a different, finer-grained affine
/// transform than the map projection above).
const MINIMAP_SCALE: f64 = 0.000000117118912;
const MINIMAP_X_OFFSET: f64 = 0.03804908;
const MINIMAP_Y_OFFSET: f64 = -0.0439383731;

/// Geohash precision for the coarse location label.
const GEOHASH_LEN: usize = 12;

/// Extract the first `HH:MM:SS` substring from a free-form status string and
/// convert it to total seconds.
///
/// Returns `None` when no such substring is present; callers must skip the
/// sample rather than emit a misleading zero.
pub fn parse_time_seconds(status: &str) -> Option<f64> {
    let caps = DURATION_RE.captures(status)?;
    // The pattern guarantees two-digit numeric captures.
    let field = |i: usize| caps[i].parse::<f64>().unwrap_or(0.0);
    Some(field(1) * 3600.0 + field(2) * 60.0 + field(3))
}

/// Map a boolean flag onto a gauge value: true -> 1.0, false -> 0.0.
pub fn bool_gauge(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Project a world X coordinate onto map longitude.
pub fn map_longitude(x: f64) -> f64 {
    x * MAP_LON_SCALE + MAP_LON_OFFSET
}

/// Project a world Y coordinate onto map latitude.
pub fn map_latitude(y: f64) -> f64 {
    y * MAP_LAT_SCALE + MAP_LAT_OFFSET
}

/// Derive the coarse geohash location token for a projected position.
pub fn geohash_token(lat: f64, lon: f64) -> String {
    let coord = Coord {
        x: lon.clamp(-180.0, 180.0),
        y: lat.clamp(-90.0, 90.0),
    };
    geohash::encode(coord, GEOHASH_LEN).unwrap_or_default()
}

/// Project a world X coordinate onto the player minimap.
pub fn minimap_x(x: f64) -> f64 {
    x * MINIMAP_SCALE + MINIMAP_X_OFFSET
}

/// Project a world Y coordinate onto the player minimap.
pub fn minimap_y(y: f64) -> f64 {
    y * MINIMAP_SCALE + MINIMAP_Y_OFFSET
}

/// Format a numeric label value deterministically: shortest decimal form
/// that round-trips, never exponent notation, no locale dependence.
///
/// Repeated polls with unchanged input therefore produce byte-identical
/// label sets.
pub fn format_label(v: f64) -> String {
    v.to_string()
}
