//! Pointer interaction state: what a click on a building means depends on the
//! active mode.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::connections::Connection;
use crate::rng::{LayoutClock, LayoutRng};
use crate::world::CityWorld;

pub const NEW_LINK_TEXT: &str = "New Link Established";
pub const NEW_LINK_EFFICIENCY: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Clicks select a building for editing.
    #[default]
    Editor,
    /// First click picks the source, second click links it to the target.
    Connection,
    /// Clicks append waypoints for a road path.
    Road,
    /// Guided tour; clicks select like in the editor.
    Presentation,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Selected,
    SourcePicked,
    Linked(Connection),
    WaypointAdded,
    /// Re-clicking the link source, or a waypoint already on the path.
    Ignored,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    selected: Option<String>,
    selected_connection: Option<String>,
    connection_source: Option<String>,
    road_waypoints: Vec<String>,
}

impl InteractionState {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_connection(&self) -> Option<&str> {
        self.selected_connection.as_deref()
    }

    pub fn connection_source(&self) -> Option<&str> {
        self.connection_source.as_deref()
    }

    pub fn road_waypoints(&self) -> &[String] {
        &self.road_waypoints
    }

    /// Switch mode, dropping any half-finished link or road path.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
        self.connection_source = None;
        self.selected_connection = None;
        self.road_waypoints.clear();
    }

    /// Handle a click on building `id`.
    ///
    /// In connection mode a completed link is returned in
    /// [`SelectOutcome::Linked`]; the caller adds it to the world.
    pub fn select(
        &mut self,
        id: &str,
        world: &CityWorld,
        rng: &mut LayoutRng,
        clock: &mut LayoutClock,
    ) -> SelectOutcome {
        match self.mode {
            InteractionMode::Connection => match self.connection_source.take() {
                None => {
                    self.connection_source = Some(id.to_string());
                    SelectOutcome::SourcePicked
                }
                Some(source) if source == id => {
                    self.connection_source = Some(source);
                    SelectOutcome::Ignored
                }
                Some(source) => {
                    let link = new_link(&source, id, world, rng, clock);
                    self.selected_connection = Some(link.id.clone());
                    SelectOutcome::Linked(link)
                }
            },
            InteractionMode::Road => {
                if self.road_waypoints.iter().any(|w| w == id) {
                    SelectOutcome::Ignored
                } else {
                    self.road_waypoints.push(id.to_string());
                    SelectOutcome::WaypointAdded
                }
            }
            InteractionMode::Editor | InteractionMode::Presentation => {
                self.selected = Some(id.to_string());
                self.selected_connection = None;
                SelectOutcome::Selected
            }
        }
    }

    /// Hand over the road path and leave road mode.
    pub fn take_road_path(&mut self) -> Vec<String> {
        let path = std::mem::take(&mut self.road_waypoints);
        self.set_mode(InteractionMode::Editor);
        path
    }

    pub fn reset_road_path(&mut self) {
        self.road_waypoints.clear();
    }

    /// Forget references to a building that no longer exists.
    pub fn forget(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.connection_source.as_deref() == Some(id) {
            self.connection_source = None;
        }
        self.road_waypoints.retain(|w| w != id);
    }
}

fn new_link(
    from: &str,
    to: &str,
    world: &CityWorld,
    rng: &mut LayoutRng,
    clock: &mut LayoutClock,
) -> Connection {
    let name_of = |id: &str, fallback: &'static str| {
        world
            .building(id)
            .and_then(|b| b.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    };
    let from_name = name_of(from, "Node A");
    let to_name = name_of(to, "Node B");

    let mut link = Connection::new(
        format!("conn-{}", clock.stamp()),
        from.to_string(),
        to.to_string(),
        rng.palette_color(),
    );
    link.efficiency = Some(NEW_LINK_EFFICIENCY);
    link.custom_text = Some(NEW_LINK_TEXT.to_string());
    link.custom_number = Some(0.0);
    link.description = Some(format!(
        "Direct high-bandwidth link established between {from_name} and {to_name}."
    ));
    link
}
