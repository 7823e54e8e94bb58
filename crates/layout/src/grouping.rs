//! Connected-component grouping of blueprint cells.
//!
//! A group is a maximal set of same-type cells joined through their four
//! cardinal neighbours. Diagonal contact does not join groups.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::grid::{BlueprintGrid, CellType};

/// Inclusive bounding box of a group, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl GroupBounds {
    fn at(row: usize, col: usize) -> Self {
        Self {
            min_row: row,
            max_row: row,
            min_col: col,
            max_col: col,
        }
    }

    fn include(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.max_row = self.max_row.max(row);
        self.min_col = self.min_col.min(col);
        self.max_col = self.max_col.max(col);
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.min_row..=self.max_row).contains(&row) && (self.min_col..=self.max_col).contains(&col)
    }

    /// The top-left cell, where group metadata lives.
    pub fn anchor(&self) -> (usize, usize) {
        (self.min_row, self.min_col)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGroup {
    /// Discovery index, 0-based in row-major order of seed cells.
    pub id: usize,
    pub cell_type: CellType,
    /// The first cell of the group met by the row-major scan.
    pub seed: (usize, usize),
    /// Cells in BFS visiting order, starting with the seed.
    pub cells: Vec<(usize, usize)>,
    pub bounds: GroupBounds,
}

impl CellGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.bounds.contains(row, col) && self.cells.contains(&(row, col))
    }
}

/// Find every connected group of non-EMPTY cells, or only groups of `target`
/// when given. Groups come out in row-major order of their seed cell.
pub fn find_groups(grid: &BlueprintGrid, target: Option<CellType>) -> Vec<CellGroup> {
    let mut visited = vec![false; grid.size * grid.size];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for row in 0..grid.size {
        for col in 0..grid.size {
            let cell_type = grid.cell_type(row, col);
            if cell_type == CellType::Empty || visited[grid.index(row, col)] {
                continue;
            }
            if target.is_some_and(|t| t != cell_type) {
                continue;
            }

            let mut cells = Vec::new();
            let mut bounds = GroupBounds::at(row, col);
            visited[grid.index(row, col)] = true;
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                cells.push((r, c));
                bounds.include(r, c);
                let (neighbors, count) = grid.neighbors4(r, c);
                for &(nr, nc) in &neighbors[..count] {
                    let idx = grid.index(nr, nc);
                    if !visited[idx] && grid.cell_type(nr, nc) == cell_type {
                        visited[idx] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }

            groups.push(CellGroup {
                id: groups.len(),
                cell_type,
                seed: (row, col),
                cells,
                bounds,
            });
        }
    }
    groups
}

/// Convenience for the common case of counting building groups.
pub fn building_groups(grid: &BlueprintGrid) -> Vec<CellGroup> {
    find_groups(grid, Some(CellType::Building))
}
