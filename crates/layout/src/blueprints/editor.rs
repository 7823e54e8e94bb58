//! `BlueprintEditor` resource: the working copy of an open blueprint.
//!
//! Editing is cell-based. Building groups are rediscovered from the grid on
//! every query, so the mapping from records to groups always reflects the
//! current drawing.

use bevy::prelude::*;

use crate::auto_layout::pack;
use crate::error::LayoutError;
use crate::grid::{BlueprintCell, CellType};
use crate::grouping::{building_groups, CellGroup};

use super::blueprint::Blueprint;

#[derive(Resource, Debug, Clone, Default)]
pub struct BlueprintEditor {
    open: Option<Blueprint>,
    validation_error: Option<String>,
}

impl BlueprintEditor {
    /// Open `blueprint` for editing, replacing whatever was open.
    pub fn open(&mut self, blueprint: Blueprint) {
        self.open = Some(blueprint);
        self.validation_error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.open.as_ref()
    }

    /// Message of the last failed auto-layout or commit, cleared by edits.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    fn blueprint_mut(&mut self) -> Result<&mut Blueprint, LayoutError> {
        self.open.as_mut().ok_or(LayoutError::NoOpenBlueprint)
    }

    /// Paint one cell with `tool`. Painting a cell with its own type erases
    /// it. Coordinates outside the grid are ignored.
    pub fn paint(&mut self, row: usize, col: usize, tool: CellType) -> Result<(), LayoutError> {
        let blueprint = self.blueprint_mut()?;
        if !blueprint.grid.in_bounds(row, col) {
            return Ok(());
        }
        let next = if blueprint.grid.cell_type(row, col) == tool {
            CellType::Empty
        } else {
            tool
        };
        blueprint.grid.set(row, col, BlueprintCell::bare(next));
        self.validation_error = None;
        Ok(())
    }

    /// Erase every cell. Pending records are kept.
    pub fn clear(&mut self) -> Result<(), LayoutError> {
        self.blueprint_mut()?.grid.clear();
        self.validation_error = None;
        Ok(())
    }

    pub fn rename(&mut self, name: String) -> Result<(), LayoutError> {
        self.blueprint_mut()?.name = name;
        Ok(())
    }

    /// Replace the drawing with one building block per pending record.
    pub fn auto_layout(&mut self) -> Result<(), LayoutError> {
        let blueprint = self.blueprint_mut()?;
        match pack(blueprint.source_metadata.len(), blueprint.grid.size) {
            Ok(grid) => {
                blueprint.grid = grid;
                self.validation_error = None;
                Ok(())
            }
            Err(e) => {
                self.validation_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Building groups of the working grid in discovery order.
    pub fn building_groups(&self) -> Vec<CellGroup> {
        self.open
            .as_ref()
            .map(|bp| building_groups(&bp.grid))
            .unwrap_or_default()
    }

    /// Validate the drawing and produce the finished blueprint.
    ///
    /// With pending records, the number of building groups must equal the
    /// number of records; record `i` is then written onto the anchor cell of
    /// group `i`. Without records any drawing is accepted. The editor stays
    /// open until [`close`](Self::close).
    pub fn commit(&mut self, created_at: u64) -> Result<Blueprint, LayoutError> {
        let groups = self.building_groups();
        let blueprint = self.open.as_ref().ok_or(LayoutError::NoOpenBlueprint)?;
        let records = &blueprint.source_metadata;

        if !records.is_empty() && groups.len() != records.len() {
            let err = LayoutError::GroupCountMismatch {
                expected: records.len(),
                found: groups.len(),
            };
            self.validation_error = Some(err.to_string());
            return Err(err);
        }

        let mut finished = blueprint.clone();
        for (group, record) in groups.iter().zip(records) {
            let (row, col) = group.bounds.anchor();
            finished.grid.get_mut(row, col).attach_metadata(record);
        }
        finished.created_at = created_at;
        self.validation_error = None;
        Ok(finished)
    }

    pub fn close(&mut self) -> Option<Blueprint> {
        self.validation_error = None;
        self.open.take()
    }
}
