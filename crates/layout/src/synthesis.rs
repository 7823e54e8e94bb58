//! Grid → world synthesis.
//!
//! Building cells are merged into one tower per connected group; zone, road
//! and decor cells each become their own one-cell ground tile. The tile
//! granularity for ground kinds is intentional and kept even though it differs
//! from how towers are produced.

use crate::buildings::{Building, BuildingKind};
use crate::config::{
    AREA_COLOR, AREA_Y, DECOR_COLOR, DECOR_HEIGHT, DECOR_Y, DEFAULT_MARKET_CAP, FLAT_TILE_HEIGHT,
    ROAD_COLOR, ROAD_TILE_Y, TOWER_BASE_HEIGHT, TOWER_HEIGHT_PER_CELL, TOWER_SEAM_FACTOR,
};
use crate::grid::{BlueprintCell, BlueprintGrid, CellType};
use crate::grouping::{find_groups, CellGroup};
use crate::palette::palette_color;

pub const FALLBACK_DESCRIPTION: &str = "Infrastructure node.";

/// Rebuild the world from a blueprint grid.
///
/// `stamp` makes the generated ids unique per synthesis run. Output follows
/// the row-major scan order of each tile or group's first cell.
pub fn synthesize(grid: &BlueprintGrid, scale: f32, stamp: u64) -> Vec<Building> {
    let mut buildings = Vec::new();
    let mut color_index = 0usize;
    let groups = find_groups(grid, Some(CellType::Building));
    let mut next_group = groups.iter().peekable();

    for row in 0..grid.size {
        for col in 0..grid.size {
            let cell = grid.get(row, col);
            match cell.cell_type {
                CellType::Empty => {}
                CellType::Building => {
                    // Groups are seeded in the same row-major order, so the
                    // next unconsumed group starts here iff this is its seed.
                    if let Some(group) = next_group.next_if(|g| g.seed == (row, col)) {
                        buildings.push(tower_from_group(grid, group, scale, stamp, &mut color_index));
                    }
                }
                flat => buildings.push(flat_tile(cell, flat, row, col, grid.size, scale, stamp)),
            }
        }
    }
    buildings
}

fn flat_tile(
    cell: &BlueprintCell,
    cell_type: CellType,
    row: usize,
    col: usize,
    grid_size: usize,
    scale: f32,
    stamp: u64,
) -> Building {
    let (kind, label, name, height, y, default_color) = match cell_type {
        CellType::Road => (
            BuildingKind::Road,
            "ROAD",
            "Transit Pipeline",
            FLAT_TILE_HEIGHT,
            ROAD_TILE_Y,
            ROAD_COLOR,
        ),
        CellType::Decor => (
            BuildingKind::Decor,
            "DECOR",
            "Urban Decor",
            DECOR_HEIGHT,
            DECOR_Y,
            DECOR_COLOR,
        ),
        _ => (
            BuildingKind::Area,
            "AREA",
            "Zoning Zone",
            FLAT_TILE_HEIGHT,
            AREA_Y,
            AREA_COLOR,
        ),
    };
    let x = BlueprintGrid::index_to_world(col, grid_size, scale);
    let z = BlueprintGrid::index_to_world(row, grid_size, scale);

    Building {
        id: format!("node-{label}-{stamp}-{row}-{col}"),
        position: [x, y, z],
        size: [scale, height, scale],
        color: non_empty(&cell.color).unwrap_or(default_color).to_string(),
        name: Some(name.to_string()),
        description: None,
        market_cap: None,
        stats: None,
        kind,
    }
}

fn tower_from_group(
    grid: &BlueprintGrid,
    group: &CellGroup,
    scale: f32,
    stamp: u64,
    color_index: &mut usize,
) -> Building {
    let bounds = group.bounds;
    let (anchor_row, anchor_col) = bounds.anchor();
    let meta = grid.get(anchor_row, anchor_col);
    let (seed_row, seed_col) = group.seed;

    let center_col = (bounds.min_col + bounds.max_col) as f32 / 2.0;
    let center_row = (bounds.min_row + bounds.max_row) as f32 / 2.0;
    let offset = crate::config::grid_offset(grid.size, scale);
    let x = offset + center_col * scale + scale / 2.0;
    let z = offset + center_row * scale + scale / 2.0;
    let height = tower_height(group.len());

    let color = match non_empty(&meta.color) {
        Some(color) => color.to_string(),
        None => {
            let color = palette_color(*color_index);
            *color_index += 1;
            color
        }
    };

    Building {
        id: format!("hub-{stamp}-{seed_row}-{seed_col}"),
        position: [x, height / 2.0, z],
        size: [
            bounds.width() as f32 * scale * TOWER_SEAM_FACTOR,
            height,
            bounds.height() as f32 * scale * TOWER_SEAM_FACTOR,
        ],
        color,
        name: Some(
            non_empty(&meta.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Building Cluster {seed_row}-{seed_col}")),
        ),
        description: Some(
            non_empty(&meta.description)
                .unwrap_or(FALLBACK_DESCRIPTION)
                .to_string(),
        ),
        market_cap: Some(
            meta.market_cap
                .filter(|cap| *cap != 0.0)
                .unwrap_or(DEFAULT_MARKET_CAP),
        ),
        stats: None,
        kind: BuildingKind::Tower,
    }
}

/// Tower height for a group of `cells` cells. Bigger footprints make taller
/// towers.
pub fn tower_height(cells: usize) -> f32 {
    TOWER_BASE_HEIGHT + TOWER_HEIGHT_PER_CELL * cells as f32
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
