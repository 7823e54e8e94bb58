//! # TestLayout: headless harness for driving `LayoutPlugin` in tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `LayoutPlugin`, a manual
//! clock starting at 1000 and the default RNG seed, so generated ids and link
//! colours are the same on every run.

use bevy::app::App;
use bevy::prelude::*;

use crate::blueprints::BlueprintEditor;
use crate::buildings::{Building, BuildingKind};
use crate::config::LayoutConfig;
use crate::connections::Connection;
use crate::grid::{BlueprintGrid, CellType};
use crate::interaction::{InteractionMode, InteractionState};
use crate::layout_actions::{
    ActionQueue, ActionResult, ActionResultLog, ActionSource, BlueprintApplied, LayoutAction,
    LayoutFailed, RoadPathConfirmed,
};
use crate::rng::{LayoutClock, LayoutRng};
use crate::world::CityWorld;
use crate::LayoutPlugin;

/// First stamp handed out by the harness clock.
pub const TEST_CLOCK_START: u64 = 1000;

pub struct TestLayout {
    app: App,
}

impl Default for TestLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLayout {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// The default city (the single GPU hub) with a deterministic clock.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(LayoutClock::manual(TEST_CLOCK_START));
        app.insert_resource(LayoutRng::default());
        app.add_plugins(LayoutPlugin);
        app.update();
        Self { app }
    }

    /// A city with no buildings and no links.
    pub fn empty() -> Self {
        Self::new().with_city(Vec::new(), Vec::new())
    }

    pub fn with_city(mut self, buildings: Vec<Building>, connections: Vec<Connection>) -> Self {
        self.app
            .world_mut()
            .insert_resource(CityWorld::new(buildings, connections));
        self
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.app.world_mut().insert_resource(config);
        self
    }

    /// Add a structural building spanning grid cells
    /// `(row..row+rows, col..col+cols)` exactly.
    pub fn with_tower(mut self, id: &str, name: &str, row: usize, col: usize, rows: usize, cols: usize) -> Self {
        let building = tower_on_cells(id, name, row, col, rows, cols, self.config());
        self.world_state_mut().add_building(building);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue `action`, run one update and return its result.
    pub fn act(&mut self, action: LayoutAction) -> ActionResult {
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(ActionSource::Player, action);
        self.app.update();
        self.resource::<ActionResultLog>()
            .last_result()
            .cloned()
            .unwrap_or(ActionResult::Success)
    }

    /// Run `actions` in order, panicking on the first failure.
    pub fn act_all(&mut self, actions: impl IntoIterator<Item = LayoutAction>) {
        for action in actions {
            let name = action.name();
            let result = self.act(action);
            assert!(result.is_success(), "{name} failed: {result:?}");
        }
    }

    pub fn select(&mut self, id: &str) -> ActionResult {
        self.act(LayoutAction::Select { id: id.to_string() })
    }

    pub fn set_mode(&mut self, mode: InteractionMode) -> ActionResult {
        self.act(LayoutAction::SetMode { mode })
    }

    pub fn paint(&mut self, row: usize, col: usize, tool: CellType) -> ActionResult {
        self.act(LayoutAction::PaintCell { row, col, tool })
    }

    pub fn update(&mut self) {
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn city(&self) -> &CityWorld {
        self.resource::<CityWorld>()
    }

    fn world_state_mut(&mut self) -> Mut<'_, CityWorld> {
        self.app.world_mut().resource_mut::<CityWorld>()
    }

    pub fn editor(&self) -> &BlueprintEditor {
        self.resource::<BlueprintEditor>()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.resource::<InteractionState>()
    }

    pub fn config(&self) -> LayoutConfig {
        *self.resource::<LayoutConfig>()
    }

    /// The live city projected onto the grid.
    pub fn grid(&self) -> BlueprintGrid {
        self.city().current_grid(&self.config())
    }

    pub fn buildings_of_kind(&self, kind: BuildingKind) -> Vec<&Building> {
        self.city()
            .buildings()
            .iter()
            .filter(|b| b.kind == kind)
            .collect()
    }

    /// Drain every `LayoutFailed` event sent so far.
    pub fn take_failures(&mut self) -> Vec<LayoutFailed> {
        self.app
            .world_mut()
            .resource_mut::<Events<LayoutFailed>>()
            .drain()
            .collect()
    }

    pub fn take_applied(&mut self) -> Vec<BlueprintApplied> {
        self.app
            .world_mut()
            .resource_mut::<Events<BlueprintApplied>>()
            .drain()
            .collect()
    }

    pub fn take_road_confirmations(&mut self) -> Vec<RoadPathConfirmed> {
        self.app
            .world_mut()
            .resource_mut::<Events<RoadPathConfirmed>>()
            .drain()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_building_count(&self, expected: usize) {
        let actual = self.city().buildings().len();
        assert_eq!(actual, expected, "expected {expected} buildings, found {actual}");
    }

    pub fn assert_cell(&self, row: usize, col: usize, expected: CellType) {
        let actual = self.grid().cell_type(row, col);
        assert_eq!(actual, expected, "cell ({row}, {col})");
    }

    pub fn assert_ids_unique(&self) {
        let mut ids: Vec<&str> = self.city().buildings().iter().map(|b| b.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "building ids must be unique");
    }
}

/// A tower whose footprint covers grid cells `(row..row+rows, col..col+cols)`
/// and nothing else.
pub fn tower_on_cells(
    id: &str,
    name: &str,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    config: LayoutConfig,
) -> Building {
    let scale = config.scale;
    let offset = config.offset();
    // Inset by half a unit so float rounding cannot reach a neighbour cell.
    let width = cols as f32 * scale - 1.0;
    let depth = rows as f32 * scale - 1.0;
    let x = offset + col as f32 * scale + cols as f32 * scale / 2.0;
    let z = offset + row as f32 * scale + rows as f32 * scale / 2.0;
    Building {
        id: id.to_string(),
        position: [x, 5.0, z],
        size: [width, 10.0, depth],
        color: "#22d3ee".to_string(),
        name: Some(name.to_string()),
        description: None,
        market_cap: None,
        stats: None,
        kind: BuildingKind::Tower,
    }
}
