//! Manhattan road paths between selected buildings.
//!
//! Each consecutive pair of waypoints is joined by an "L": a leg along X at the
//! start building's Z, then a leg along Z at the end building's X. Both legs
//! are padded so they run into the footprints they join and meet at the
//! corner without a gap.

use crate::buildings::{Building, BuildingKind};
use crate::config::{
    FLAT_TILE_HEIGHT, ROAD_COLOR, ROAD_H_Y, ROAD_SEGMENT_MARGIN, ROAD_SEGMENT_WIDTH, ROAD_V_Y,
};

/// Plan road segments through `waypoint_ids` in order.
///
/// Returns nothing for fewer than two waypoints. Pairs with an id missing from
/// `buildings` are skipped. Road colour follows the first waypoint, or the
/// default road colour if it cannot be found.
pub fn plan_road_path(waypoint_ids: &[String], buildings: &[Building], stamp: u64) -> Vec<Building> {
    if waypoint_ids.len() < 2 {
        return Vec::new();
    }
    let find = |id: &str| buildings.iter().find(|b| b.id == id);
    let color = find(&waypoint_ids[0])
        .map(|b| b.color.clone())
        .unwrap_or_else(|| ROAD_COLOR.to_string());

    let mut segments = Vec::with_capacity((waypoint_ids.len() - 1) * 2);
    for (i, pair) in waypoint_ids.windows(2).enumerate() {
        let (Some(start), Some(end)) = (find(&pair[0]), find(&pair[1])) else {
            continue;
        };
        let [px, _, pz] = start.position;
        let [qx, _, qz] = end.position;

        segments.push(road_segment(
            format!("road-h-{stamp}-{i}"),
            "Transit Pipeline H",
            [(px + qx) / 2.0, ROAD_H_Y, pz],
            [(qx - px).abs() + ROAD_SEGMENT_MARGIN, FLAT_TILE_HEIGHT, ROAD_SEGMENT_WIDTH],
            &color,
        ));
        segments.push(road_segment(
            format!("road-v-{stamp}-{i}"),
            "Transit Pipeline V",
            [qx, ROAD_V_Y, (pz + qz) / 2.0],
            [ROAD_SEGMENT_WIDTH, FLAT_TILE_HEIGHT, (qz - pz).abs() + ROAD_SEGMENT_MARGIN],
            &color,
        ));
    }
    segments
}

fn road_segment(id: String, name: &str, position: [f32; 3], size: [f32; 3], color: &str) -> Building {
    Building {
        id,
        position,
        size,
        color: color.to_string(),
        name: Some(name.to_string()),
        description: None,
        market_cap: None,
        stats: None,
        kind: BuildingKind::Road,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(id: &str, x: f32, z: f32, color: &str) -> Building {
        Building {
            id: id.to_string(),
            position: [x, 2.0, z],
            size: [4.0, 4.0, 4.0],
            color: color.to_string(),
            name: None,
            description: None,
            market_cap: None,
            stats: None,
            kind: BuildingKind::Gpu,
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn contains_point(b: &Building, x: f32, z: f32) -> bool {
        let (min_x, max_x, min_z, max_z) = b.footprint();
        (min_x..=max_x).contains(&x) && (min_z..=max_z).contains(&z)
    }

    #[test]
    fn test_two_waypoints_make_an_l() {
        let world = vec![at("a", 0.0, 0.0, "#f00"), at("b", 10.0, 10.0, "#0f0")];
        let roads = plan_road_path(&ids(&["a", "b"]), &world, 1);
        assert_eq!(roads.len(), 2);
        let (h, v) = (&roads[0], &roads[1]);

        assert_eq!(h.position, [5.0, 0.1, 0.0]);
        assert!((h.size[0] - 14.1).abs() < 1e-4);
        assert_eq!(h.size[2], 4.0);
        assert_eq!(v.position, [10.0, 0.1001, 5.0]);
        assert!((v.size[2] - 14.1).abs() < 1e-4);
        assert_eq!(v.size[0], 4.0);

        // Both endpoints are covered and the legs overlap at the corner.
        assert!(contains_point(h, 0.0, 0.0));
        assert!(contains_point(v, 10.0, 10.0));
        assert!(contains_point(h, 10.0, 0.0));
        assert!(contains_point(v, 10.0, 0.0));

        assert!(roads.iter().all(|r| r.kind == BuildingKind::Road && r.color == "#f00"));
        assert_ne!(h.position[1], v.position[1]);
    }

    #[test]
    fn test_fewer_than_two_waypoints_is_noop() {
        let world = vec![at("a", 0.0, 0.0, "#f00")];
        assert!(plan_road_path(&ids(&["a"]), &world, 1).is_empty());
        assert!(plan_road_path(&[], &world, 1).is_empty());
    }

    #[test]
    fn test_missing_endpoint_skips_only_that_pair() {
        let world = vec![at("a", 0.0, 0.0, "#f00"), at("c", -20.0, 30.0, "#00f")];
        let roads = plan_road_path(&ids(&["a", "ghost", "c", "a"]), &world, 3);
        // a→ghost and ghost→c are skipped; c→a survives as pair index 2.
        assert_eq!(roads.len(), 2);
        assert_eq!(roads[0].id, "road-h-3-2");
        assert_eq!(roads[1].id, "road-v-3-2");
    }

    #[test]
    fn test_unknown_first_waypoint_uses_default_colour() {
        let world = vec![at("b", 0.0, 0.0, "#0f0"), at("c", 8.0, 0.0, "#00f")];
        let roads = plan_road_path(&ids(&["ghost", "b", "c"]), &world, 1);
        assert_eq!(roads.len(), 2);
        assert!(roads.iter().all(|r| r.color == ROAD_COLOR));
    }

    #[test]
    fn test_three_waypoints_make_four_segments() {
        let world = vec![
            at("a", 0.0, 0.0, "#f00"),
            at("b", 24.0, 0.0, "#0f0"),
            at("c", 24.0, -36.0, "#00f"),
        ];
        let roads = plan_road_path(&ids(&["a", "b", "c"]), &world, 1);
        assert_eq!(roads.len(), 4);
        // a→b is purely horizontal: the vertical leg degenerates to the margin.
        assert!((roads[1].size[2] - ROAD_SEGMENT_MARGIN).abs() < 1e-4);
    }
}
