//! Serializable snapshot of everything an external driver can see.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::blueprints::BlueprintEditor;
use crate::buildings::Building;
use crate::config::LayoutConfig;
use crate::connections::Connection;
use crate::grid::CellType;
use crate::interaction::{InteractionMode, InteractionState};
use crate::world::CityWorld;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutObservation {
    pub buildings: Vec<Building>,
    pub connections: Vec<Connection>,
    /// The live city projected onto the grid, row by row.
    pub grid: Vec<Vec<CellType>>,
    pub mode: InteractionMode,
    pub selected: Option<String>,
    pub connection_source: Option<String>,
    pub road_waypoints: Vec<String>,
    pub tour_index: usize,
    /// Present while a blueprint is open in the editor.
    pub editor: Option<EditorObservation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorObservation {
    pub blueprint_id: String,
    pub name: String,
    pub grid: Vec<Vec<CellType>>,
    pub pending_records: usize,
    pub building_groups: usize,
    pub validation_error: Option<String>,
}

impl LayoutObservation {
    pub fn capture(
        city: &CityWorld,
        editor: &BlueprintEditor,
        interaction: &InteractionState,
        config: &LayoutConfig,
    ) -> Self {
        let editor = editor.blueprint().map(|bp| EditorObservation {
            blueprint_id: bp.id.clone(),
            name: bp.name.clone(),
            grid: bp.grid.type_rows(),
            pending_records: bp.source_metadata.len(),
            building_groups: editor.building_groups().len(),
            validation_error: editor.validation_error().map(str::to_string),
        });
        Self {
            buildings: city.buildings().to_vec(),
            connections: city.connections().to_vec(),
            grid: city.current_grid(config).type_rows(),
            mode: interaction.mode(),
            selected: interaction.selected().map(str::to_string),
            connection_source: interaction.connection_source().map(str::to_string),
            road_waypoints: interaction.road_waypoints().to_vec(),
            tour_index: city.tour_index(),
            editor,
        }
    }

    /// Snapshot from an app world with `LayoutPlugin` installed.
    pub fn from_world(world: &World) -> Self {
        Self::capture(
            world.resource::<CityWorld>(),
            world.resource::<BlueprintEditor>(),
            world.resource::<InteractionState>(),
            world.resource::<LayoutConfig>(),
        )
    }
}
