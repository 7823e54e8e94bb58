//! Auto-layout: reserve one square building block per imported record.
//!
//! The grid (minus one row and column of padding at its low edge) is split
//! into a near-square `rows × cols` arrangement of equal slots. Each record
//! gets a block in the top-left of its slot, leaving a one-cell gutter between
//! neighbouring blocks so that they stay separate groups.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::grid::{BlueprintCell, BlueprintGrid, CellType};

/// Padding reserved at the grid's low edge, in cells.
const EDGE_PADDING: usize = 1;

/// Slot arrangement chosen for a record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPlan {
    pub rows: usize,
    pub cols: usize,
    pub slot_width: usize,
    pub slot_height: usize,
    /// Side of each square block.
    pub block_size: usize,
}

impl PackPlan {
    pub fn new(record_count: usize, grid_size: usize) -> Result<Self, LayoutError> {
        if record_count == 0 {
            return Err(LayoutError::EmptyDataset);
        }
        let cols = (record_count as f64).sqrt().ceil() as usize;
        let rows = record_count.div_ceil(cols);
        let usable = grid_size.saturating_sub(EDGE_PADDING);
        let slot_width = usable / cols;
        let slot_height = usable / rows;
        let block_size = slot_width.min(slot_height).saturating_sub(1).max(1);
        Ok(Self {
            rows,
            cols,
            slot_width,
            slot_height,
            block_size,
        })
    }

    /// Top-left cell of slot `(row, col)`.
    pub fn slot_origin(&self, row: usize, col: usize) -> (usize, usize) {
        (
            row * self.slot_height + EDGE_PADDING,
            col * self.slot_width + EDGE_PADDING,
        )
    }
}

/// Build a grid with one BUILDING block per record, placed row-major.
///
/// Cells that would fall outside the grid are dropped. Fails on an empty
/// dataset.
pub fn pack(record_count: usize, grid_size: usize) -> Result<BlueprintGrid, LayoutError> {
    let plan = PackPlan::new(record_count, grid_size)?;
    let mut grid = BlueprintGrid::new(grid_size);

    let slots = (0..plan.rows).flat_map(|r| (0..plan.cols).map(move |c| (r, c)));
    for (row, col) in slots.take(record_count) {
        let (start_row, start_col) = plan.slot_origin(row, col);
        for r in start_row..start_row + plan.block_size {
            for c in start_col..start_col + plan.block_size {
                if grid.in_bounds(r, c) {
                    grid.set(r, c, BlueprintCell::bare(CellType::Building));
                }
            }
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::building_groups;

    #[test]
    fn test_zero_records_is_an_error() {
        assert_eq!(pack(0, 16), Err(LayoutError::EmptyDataset));
    }

    #[test]
    fn test_plan_for_five_records() {
        let plan = PackPlan::new(5, 16).unwrap();
        assert_eq!((plan.rows, plan.cols), (2, 3));
        assert_eq!((plan.slot_width, plan.slot_height), (5, 7));
        assert_eq!(plan.block_size, 4);
        assert_eq!(plan.slot_origin(1, 2), (8, 11));
    }

    #[test]
    fn test_five_records_make_five_equal_square_blocks() {
        let grid = pack(5, 16).unwrap();
        let groups = building_groups(&grid);
        assert_eq!(groups.len(), 5);
        for g in &groups {
            assert_eq!(g.bounds.width(), 4);
            assert_eq!(g.bounds.height(), 4);
            assert_eq!(g.len(), 16);
            assert!(g.bounds.max_row < 16 && g.bounds.max_col < 16);
        }
        assert_eq!(grid.count(CellType::Building), 80);
        // Padding row and column stay empty.
        for i in 0..16 {
            assert_eq!(grid.cell_type(0, i), CellType::Empty);
            assert_eq!(grid.cell_type(i, 0), CellType::Empty);
        }
    }

    #[test]
    fn test_single_record_fills_most_of_grid() {
        let grid = pack(1, 16).unwrap();
        let groups = building_groups(&grid);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bounds.width(), 14);
        assert_eq!(groups[0].bounds.anchor(), (1, 1));
    }

    #[test]
    fn test_group_count_matches_records_for_typical_sizes() {
        for n in 1..=25 {
            let grid = pack(n, 16).unwrap();
            assert_eq!(building_groups(&grid).len(), n, "record count {n}");
        }
    }

    #[test]
    fn test_minimum_block_is_one_cell() {
        let plan = PackPlan::new(36, 16).unwrap();
        assert_eq!(plan.block_size, 1);
        let grid = pack(36, 16).unwrap();
        assert_eq!(grid.count(CellType::Building), 36);
    }
}
