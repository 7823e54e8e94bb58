//! The `Blueprint` record and how it is built from the live world.

use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingMetadata};
use crate::config::LayoutConfig;
use crate::grid::BlueprintGrid;
use crate::projection::project;

pub const CURRENT_SECTOR_NAME: &str = "Current City Sector";
pub const CSV_IMPORT_NAME: &str = "CSV Infrastructure Import";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub grid: BlueprintGrid,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    /// One record per expected building group, matched by discovery order.
    #[serde(default)]
    pub source_metadata: Vec<BuildingMetadata>,
}

impl Blueprint {
    /// Snapshot of the current world with no pending records.
    pub fn from_world(
        id: String,
        name: String,
        buildings: &[Building],
        config: &LayoutConfig,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            name,
            grid: project(buildings, config.grid_size, config.scale),
            created_at,
            source_metadata: Vec::new(),
        }
    }

    /// Blueprint carrying imported records, drafted on top of `grid`.
    pub fn with_records(
        id: String,
        grid: BlueprintGrid,
        records: Vec<BuildingMetadata>,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            name: CSV_IMPORT_NAME.to_string(),
            grid,
            created_at,
            source_metadata: records,
        }
    }

    /// Overlay this blueprint on the live grid: every non-EMPTY cell here
    /// wins, every EMPTY cell takes the live cell at the same position.
    pub fn merged_over(mut self, current: &BlueprintGrid) -> Self {
        for row in 0..self.grid.size {
            for col in 0..self.grid.size {
                if self.grid.get(row, col).is_empty() && current.in_bounds(row, col) {
                    self.grid.set(row, col, current.get(row, col).clone());
                }
            }
        }
        self
    }
}
