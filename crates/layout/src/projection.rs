//! World → grid projection.
//!
//! Every building stamps its ground footprint onto the blueprint grid. Ground
//! layers are written first so that roads cover zones, decor covers roads, and
//! structures cover everything beneath them.

use crate::buildings::Building;
use crate::grid::{BlueprintCell, BlueprintGrid};

/// Project `buildings` onto a `grid_size`×`grid_size` grid with `scale` world
/// units per cell.
///
/// Buildings are applied in ascending [`grid_priority`] order; ties keep their
/// collection order. Two overlapping structures resolve to whichever comes
/// later. A footprint edge lying exactly on a cell boundary does not spill
/// into the neighbouring cell. Footprints are clamped to the grid, so a
/// building entirely outside it contributes no cells.
///
/// [`grid_priority`]: crate::buildings::BuildingKind::grid_priority
pub fn project(buildings: &[Building], grid_size: usize, scale: f32) -> BlueprintGrid {
    let mut grid = BlueprintGrid::new(grid_size);
    if grid_size == 0 {
        return grid;
    }

    let mut ordered: Vec<&Building> = buildings.iter().collect();
    // sort_by_key is stable
    ordered.sort_by_key(|b| b.kind.grid_priority());

    for building in ordered {
        let Some((rows, cols)) = footprint_range(building, grid_size, scale) else {
            continue;
        };
        let cell = BlueprintCell::from_building(building);
        for row in rows {
            for col in cols.clone() {
                grid.set(row, col, cell.clone());
            }
        }
    }
    grid
}

/// Inclusive row and column ranges covered by a building's footprint, clamped
/// to the grid. `None` when the clamped range is empty.
pub fn footprint_range(
    building: &Building,
    grid_size: usize,
    scale: f32,
) -> Option<(
    std::ops::RangeInclusive<usize>,
    std::ops::RangeInclusive<usize>,
)> {
    let (min_x, max_x, min_z, max_z) = building.footprint();
    let cols = clamp_span(min_x, max_x, grid_size, scale)?;
    let rows = clamp_span(min_z, max_z, grid_size, scale)?;
    Some((rows, cols))
}

fn clamp_span(
    min: f32,
    max: f32,
    grid_size: usize,
    scale: f32,
) -> Option<std::ops::RangeInclusive<usize>> {
    let last = grid_size as i64 - 1;
    let start = BlueprintGrid::world_to_index(min, grid_size, scale).max(0);
    let end = BlueprintGrid::world_to_last_index(max, grid_size, scale).min(last);
    if start > end {
        return None;
    }
    Some(start as usize..=end as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::BuildingKind;
    use crate::grid::CellType;

    fn block(id: &str, x: f32, z: f32, w: f32, d: f32, kind: BuildingKind) -> Building {
        Building {
            id: id.to_string(),
            position: [x, 1.0, z],
            size: [w, 2.0, d],
            color: format!("#{id}"),
            name: Some(id.to_string()),
            description: None,
            market_cap: None,
            stats: None,
            kind,
        }
    }

    #[test]
    fn test_single_cell_building_at_origin() {
        // Centre cell boundary: x in [-2, 2] spans cols 7 and 8.
        let grid = project(&[block("a", 0.0, 0.0, 4.0, 4.0, BuildingKind::Gpu)], 16, 12.0);
        assert_eq!(grid.count(CellType::Building), 4);
        for (r, c) in [(7, 7), (7, 8), (8, 7), (8, 8)] {
            assert_eq!(grid.cell_type(r, c), CellType::Building);
        }
        assert_eq!(grid.get(7, 7).name.as_deref(), Some("a"));
        assert_eq!(grid.get(7, 7).color.as_deref(), Some("#a"));
    }

    #[test]
    fn test_grid_aligned_building_covers_exact_cells() {
        // Cell (2, 3) is centred at x = -54, z = -66.
        let grid = project(
            &[block("a", -54.0, -66.0, 11.0, 11.0, BuildingKind::Tower)],
            16,
            12.0,
        );
        assert_eq!(grid.count(CellType::Building), 1);
        assert_eq!(grid.cell_type(2, 3), CellType::Building);
    }

    #[test]
    fn test_structures_overwrite_ground_layers_regardless_of_order() {
        let buildings = vec![
            block("tower", -90.0, -90.0, 10.0, 10.0, BuildingKind::Tower),
            block("decor", -90.0, -90.0, 10.0, 10.0, BuildingKind::Decor),
            block("road", -90.0, -90.0, 10.0, 10.0, BuildingKind::Road),
            block("zone", -90.0, -90.0, 10.0, 10.0, BuildingKind::Area),
        ];
        let grid = project(&buildings, 16, 12.0);
        assert_eq!(grid.cell_type(0, 0), CellType::Building);
        assert_eq!(grid.get(0, 0).name.as_deref(), Some("tower"));
    }

    #[test]
    fn test_road_covers_zone() {
        let buildings = vec![
            block("road", -90.0, -90.0, 10.0, 10.0, BuildingKind::Road),
            block("zone", -84.0, -90.0, 20.0, 10.0, BuildingKind::Area),
        ];
        let grid = project(&buildings, 16, 12.0);
        assert_eq!(grid.cell_type(0, 0), CellType::Road);
        assert_eq!(grid.cell_type(0, 1), CellType::Area);
    }

    #[test]
    fn test_overlapping_structures_later_wins() {
        let buildings = vec![
            block("first", -90.0, -90.0, 10.0, 10.0, BuildingKind::Gpu),
            block("second", -90.0, -90.0, 10.0, 10.0, BuildingKind::Hospital),
        ];
        let grid = project(&buildings, 16, 12.0);
        assert_eq!(grid.get(0, 0).name.as_deref(), Some("second"));
    }

    #[test]
    fn test_out_of_bounds_footprint_is_clamped() {
        let grid = project(
            &[block("edge", 100.0, 0.0, 20.0, 4.0, BuildingKind::Tower)],
            16,
            12.0,
        );
        // x in [90, 110] → col 15 only.
        assert_eq!(grid.cell_type(7, 15), CellType::Building);
        assert_eq!(grid.cell_type(8, 15), CellType::Building);
        assert_eq!(grid.count(CellType::Building), 2);
    }

    #[test]
    fn test_fully_outside_building_contributes_nothing() {
        let grid = project(
            &[block("far", 500.0, 500.0, 4.0, 4.0, BuildingKind::Tower)],
            16,
            12.0,
        );
        assert_eq!(grid.count(CellType::Empty), 256);
    }

    #[test]
    fn test_full_cell_tile_covers_only_its_cell() {
        // Cell (7, 7) spans [-12, 0) on both axes.
        let grid = project(
            &[block("tile", -6.0, -6.0, 12.0, 12.0, BuildingKind::Area)],
            16,
            12.0,
        );
        assert_eq!(grid.count(CellType::Area), 1);
        assert_eq!(grid.cell_type(7, 7), CellType::Area);
    }

    #[test]
    fn test_edge_aligned_structure_stays_in_its_cell() {
        // Both far edges sit exactly on the boundary with cell 9.
        let grid = project(
            &[block("gpu", 6.0, 6.0, 12.0, 12.0, BuildingKind::Gpu)],
            16,
            12.0,
        );
        assert_eq!(grid.count(CellType::Building), 1);
        assert_eq!(grid.cell_type(8, 8), CellType::Building);
        assert_eq!(grid.cell_type(9, 9), CellType::Empty);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let buildings = vec![
            block("a", 0.0, 0.0, 30.0, 4.0, BuildingKind::Gpu),
            block("b", 10.0, 10.0, 4.0, 30.0, BuildingKind::Road),
        ];
        assert_eq!(project(&buildings, 16, 12.0), project(&buildings, 16, 12.0));
    }
}
