use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Side length of the square blueprint grid, in cells.
pub const GRID_SIZE: usize = 16;
/// World units covered by one grid cell along X and Z.
pub const CELL_SCALE: f32 = 12.0;

/// Number of entries in the generated colour palette.
pub const PALETTE_SIZE: usize = 50;
/// Hue step between palette entries (golden angle, degrees).
pub const PALETTE_HUE_STEP: f32 = 137.5;

/// Thickness of flat ground tiles (zones and roads).
pub const FLAT_TILE_HEIGHT: f32 = 0.2;
/// Centre height of a zone tile.
pub const AREA_Y: f32 = 0.1;
/// Centre height of a synthesized road tile. Sits just above zones so the two
/// surfaces never share a plane.
pub const ROAD_TILE_Y: f32 = 0.1005;
pub const DECOR_HEIGHT: f32 = 2.0;
pub const DECOR_Y: f32 = 1.0;

/// Tower height is `TOWER_BASE_HEIGHT + TOWER_HEIGHT_PER_CELL * cells`.
pub const TOWER_BASE_HEIGHT: f32 = 8.0;
pub const TOWER_HEIGHT_PER_CELL: f32 = 2.0;
/// Horizontal shrink applied to synthesized towers, leaves a seam between
/// neighbouring groups.
pub const TOWER_SEAM_FACTOR: f32 = 0.98;
pub const DEFAULT_MARKET_CAP: f64 = 500.0;

/// Width of a planned road segment across its direction of travel.
pub const ROAD_SEGMENT_WIDTH: f32 = 4.0;
/// Extra length added to a planned segment so it runs into the footprints of
/// the buildings it connects.
pub const ROAD_SEGMENT_MARGIN: f32 = 4.1;
/// Centre height of the horizontal (X) leg of a planned road.
pub const ROAD_H_Y: f32 = 0.1;
/// Centre height of the vertical (Z) leg of a planned road.
pub const ROAD_V_Y: f32 = 0.1001;

pub const ROAD_COLOR: &str = "#111111";
pub const AREA_COLOR: &str = "#1e293b";
pub const DECOR_COLOR: &str = "#a855f7";
pub const IMPORTED_LINK_COLOR: &str = "#3b82f6";

/// Runtime grid geometry, initialised from the constants above.
///
/// Insert a custom value before adding `LayoutPlugin` to override it.
#[derive(Resource, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub grid_size: usize,
    pub scale: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            scale: CELL_SCALE,
        }
    }
}

impl LayoutConfig {
    /// World coordinate of the grid's low edge on both X and Z.
    pub fn offset(&self) -> f32 {
        grid_offset(self.grid_size, self.scale)
    }
}

/// `-(grid_size * scale) / 2`: the grid is centred on the world origin.
pub fn grid_offset(grid_size: usize, scale: f32) -> f32 {
    -(grid_size as f32 * scale) / 2.0
}
