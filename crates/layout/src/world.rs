//! `CityWorld` resource: the live buildings and connections.
//!
//! Everything is addressed by id. Grids are never stored here; they are
//! projected from the building list whenever they are needed.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingKind, BuildingPatch};
use crate::config::LayoutConfig;
use crate::connections::{Connection, ConnectionPatch};
use crate::error::LayoutError;
use crate::grid::BlueprintGrid;
use crate::palette::palette_color;
use crate::projection::project;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CityWorld {
    buildings: Vec<Building>,
    connections: Vec<Connection>,
    /// Position within [`tourable`](Self::tourable) for presentation mode.
    tour_index: usize,
}

impl Default for CityWorld {
    /// A fresh city: one GPU hub at the origin and no links.
    fn default() -> Self {
        Self::new(
            vec![Building {
                id: "1".to_string(),
                position: [0.0, 1.0, 0.0],
                size: [4.0, 2.0, 4.0],
                color: palette_color(0),
                name: Some("Nexus Prime GPU".to_string()),
                description: Some("Core processing hub.".to_string()),
                market_cap: Some(1250.0),
                stats: None,
                kind: BuildingKind::Gpu,
            }],
            Vec::new(),
        )
    }
}

impl CityWorld {
    pub fn new(buildings: Vec<Building>, connections: Vec<Connection>) -> Self {
        Self {
            buildings,
            connections,
            tour_index: 0,
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn building(&self, id: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn add_building(&mut self, building: Building) {
        self.buildings.push(building);
    }

    pub fn extend_buildings(&mut self, buildings: impl IntoIterator<Item = Building>) {
        self.buildings.extend(buildings);
    }

    pub fn update_building(&mut self, id: &str, patch: BuildingPatch) -> Result<(), LayoutError> {
        let building = self
            .buildings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| LayoutError::UnknownId(id.to_string()))?;
        building.apply(patch);
        Ok(())
    }

    /// Remove a building together with every link touching it.
    pub fn remove_building(&mut self, id: &str) -> Result<Building, LayoutError> {
        let index = self
            .buildings
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LayoutError::UnknownId(id.to_string()))?;
        self.connections.retain(|c| !c.touches(id));
        let removed = self.buildings.remove(index);
        self.clamp_tour();
        Ok(removed)
    }

    /// Swap in a whole new building list. Links are kept even if they now
    /// dangle.
    pub fn replace_buildings(&mut self, buildings: Vec<Building>) {
        self.buildings = buildings;
        self.tour_index = 0;
    }

    pub fn replace_connections(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
        self.tour_index = 0;
    }

    pub fn replace_city(&mut self, buildings: Vec<Building>, connections: Vec<Connection>) {
        self.buildings = buildings;
        self.connections = connections;
        self.tour_index = 0;
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    pub fn update_connection(
        &mut self,
        id: &str,
        patch: ConnectionPatch,
    ) -> Result<(), LayoutError> {
        let connection = self
            .connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LayoutError::UnknownId(id.to_string()))?;
        connection.apply(patch);
        Ok(())
    }

    pub fn remove_connection(&mut self, id: &str) -> Result<Connection, LayoutError> {
        let index = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LayoutError::UnknownId(id.to_string()))?;
        Ok(self.connections.remove(index))
    }

    /// The live world projected onto a blueprint grid.
    pub fn current_grid(&self, config: &LayoutConfig) -> BlueprintGrid {
        project(&self.buildings, config.grid_size, config.scale)
    }

    // -----------------------------------------------------------------------
    // Presentation tour
    // -----------------------------------------------------------------------

    /// Buildings worth visiting: everything except zones, roads and decor.
    pub fn tourable(&self) -> Vec<&Building> {
        self.buildings
            .iter()
            .filter(|b| b.kind.is_structural())
            .collect()
    }

    pub fn tour_index(&self) -> usize {
        self.tour_index
    }

    pub fn current_tour_building(&self) -> Option<&Building> {
        self.tourable().get(self.tour_index).copied()
    }

    pub fn tour_next(&mut self) {
        let len = self.tourable().len();
        if len > 0 {
            self.tour_index = (self.tour_index + 1) % len;
        }
    }

    pub fn tour_prev(&mut self) {
        let len = self.tourable().len();
        if len > 0 {
            self.tour_index = (self.tour_index + len - 1) % len;
        }
    }

    fn clamp_tour(&mut self) {
        let len = self.tourable().len();
        if self.tour_index >= len {
            self.tour_index = 0;
        }
    }
}
