use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellType {
    #[default]
    Empty,
    Building,
    Area,
    Road,
    Decor,
}

impl CellType {
    /// Flat kinds are synthesized one building per cell rather than per group.
    pub fn is_flat(self) -> bool {
        matches!(self, CellType::Area | CellType::Road | CellType::Decor)
    }
}

/// One blueprint cell. Metadata is only meaningful on the anchor cell of a
/// building group (its top-left cell).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintCell {
    #[serde(rename = "type")]
    pub cell_type: CellType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl BlueprintCell {
    /// A cell of the given type with no metadata.
    pub fn bare(cell_type: CellType) -> Self {
        Self {
            cell_type,
            ..Default::default()
        }
    }

    /// The cell a building writes into every grid cell under its footprint.
    pub fn from_building(building: &Building) -> Self {
        Self {
            cell_type: building.kind.cell_type(),
            color: Some(building.color.clone()),
            name: building.name.clone(),
            description: building.description.clone(),
            market_cap: building.market_cap,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cell_type == CellType::Empty
    }

    /// Stamp an imported record onto this cell, keeping its type and colour.
    pub fn attach_metadata(&mut self, meta: &BuildingMetadata) {
        self.name = Some(meta.name.clone());
        self.description = Some(meta.description.clone());
        self.market_cap = Some(meta.market_cap);
    }
}

/// Square matrix of blueprint cells, stored row-major.
///
/// Row maps to world Z and column to world X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintGrid {
    pub cells: Vec<BlueprintCell>,
    pub size: usize,
}

impl BlueprintGrid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![BlueprintCell::default(); size * size],
            size,
        }
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &BlueprintCell {
        &self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut BlueprintCell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: BlueprintCell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn cell_type(&self, row: usize, col: usize) -> CellType {
        self.get(row, col).cell_type
    }

    /// Number of cells of the given type.
    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }

    /// Reset every cell to EMPTY.
    pub fn clear(&mut self) {
        self.cells.fill(BlueprintCell::default());
    }

    /// Cell types only, row by row. Handy for comparing grids while ignoring
    /// metadata.
    pub fn type_rows(&self) -> Vec<Vec<CellType>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.cell_type).collect())
            .collect()
    }

    /// World coordinate of the centre of cell `index` along one axis.
    pub fn index_to_world(index: usize, grid_size: usize, scale: f32) -> f32 {
        crate::config::grid_offset(grid_size, scale) + index as f32 * scale + scale / 2.0
    }

    /// Unclamped cell index containing world coordinate `world` along one axis.
    pub fn world_to_index(world: f32, grid_size: usize, scale: f32) -> i64 {
        ((world - crate::config::grid_offset(grid_size, scale)) / scale).floor() as i64
    }

    /// Last cell index reached by a span ending at `world` along one axis.
    ///
    /// An edge lying exactly on a cell boundary does not claim the next cell,
    /// so a grid-aligned box covers exactly the cells it was built from.
    pub fn world_to_last_index(world: f32, grid_size: usize, scale: f32) -> i64 {
        ((world - crate::config::grid_offset(grid_size, scale)) / scale).ceil() as i64 - 1
    }

    /// Returns up to 4 cardinal neighbours and the count of valid entries.
    /// Use `&result[..count]` to iterate over valid neighbours.
    pub fn neighbors4(&self, row: usize, col: usize) -> ([(usize, usize); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if col + 1 < self.size {
            result[count] = (row, col + 1);
            count += 1;
        }
        if col > 0 {
            result[count] = (row, col - 1);
            count += 1;
        }
        if row + 1 < self.size {
            result[count] = (row + 1, col);
            count += 1;
        }
        if row > 0 {
            result[count] = (row - 1, col);
            count += 1;
        }
        (result, count)
    }
}
