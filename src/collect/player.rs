// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! Player collector: position, health, ping, and tag color.

use crate::client::FrmClient;
use crate::convert::{bool_gauge, format_label, minimap_x, minimap_y};
use crate::entities::PlayerDetails;
use crate::error::Result;
use crate::metrics::MetricSet;

pub(crate) const ROUTE: &str = "/getPlayer";

pub(super) async fn collect(client: &FrmClient, set: &MetricSet) -> Result<()> {
    let details: Vec<PlayerDetails> = client.fetch(ROUTE).await?;
    emit(&details, set);
    Ok(())
}

pub fn emit(details: &[PlayerDetails], set: &MetricSet) {
    for d in details {
        let id = format_label(d.id);
        let name = d.player_name.as_str();

        // One position record fans out into three axis samples; X and Y are
        // projected onto the minimap, Z passes through raw.
        set.player_position
            .with_label_values(&[name, &id, "X"])
            .set(minimap_x(d.location.x));
        set.player_position
            .with_label_values(&[name, &id, "Y"])
            .set(minimap_y(d.location.y));
        set.player_position
            .with_label_values(&[name, &id, "Z"])
            .set(d.location.z);

        set.player_rotation
            .with_label_values(&[name, &id])
            .set(d.location.rotation);
        set.player_health
            .with_label_values(&[name, &id])
            .set(d.player_hp);
        set.player_dead
            .with_label_values(&[name, &id])
            .set(bool_gauge(d.dead));
        set.player_ping
            .with_label_values(&[name, &id])
            .set(d.ping_time);

        for (component, value) in [
            ("R", d.tag_color.r),
            ("G", d.tag_color.g),
            ("B", d.tag_color.b),
            ("A", d.tag_color.a),
        ] {
            set.player_tag_color
                .with_label_values(&[name, &id, component])
                .set(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Location, TagColor};

    #[test]
    fn test_emit_position_fans_out_three_axes() {
        let set = MetricSet::new().unwrap();
        emit(
            &[PlayerDetails {
                id: 1.0,
                player_name: "pioneer".to_string(),
                location: Location {
                    x: 0.0,
                    y: 0.0,
                    z: 230.5,
                    rotation: 90.0,
                },
                ..Default::default()
            }],
            &set,
        );

        let output = set.encode().unwrap();
        assert!(output.contains("axis_name=\"X\""));
        assert!(output.contains("axis_name=\"Y\""));
        assert!(output.contains("axis_name=\"Z\",player_id=\"1\",player_name=\"pioneer\"} 230.5"));
        assert!(output.contains("player_current_rotation{player_id=\"1\",player_name=\"pioneer\"} 90"));
    }

    #[test]
    fn test_emit_tag_color_components() {
        let set = MetricSet::new().unwrap();
        emit(
            &[PlayerDetails {
                id: 2.0,
                player_name: "builder".to_string(),
                tag_color: TagColor {
                    r: 0.25,
                    g: 0.5,
                    b: 0.75,
                    a: 1.0,
                },
                ..Default::default()
            }],
            &set,
        );

        let output = set.encode().unwrap();
        for component in ["R", "G", "B", "A"] {
            assert!(output.contains(&format!("component=\"{component}\"")));
        }
    }

    #[test]
    fn test_emit_dead_flag() {
        let set = MetricSet::new().unwrap();
        emit(
            &[PlayerDetails {
                id: 3.0,
                player_name: "ghost".to_string(),
                dead: true,
                ..Default::default()
            }],
            &set,
        );
        assert!(set
            .encode()
            .unwrap()
            .contains("player_is_dead{player_id=\"3\",player_name=\"ghost\"} 1"));
    }
}
