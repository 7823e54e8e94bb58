//! `LayoutPlugin`: registers the city state, the editor, the action pipeline
//! and its outcome events.

use bevy::prelude::*;

use crate::blueprints::BlueprintEditor;
use crate::config::LayoutConfig;
use crate::interaction::InteractionState;
use crate::layout_actions::{
    execute_queued_actions, ActionQueue, ActionResultLog, BlueprintApplied, LayoutFailed,
    RoadPathConfirmed,
};
use crate::rng::{LayoutClock, LayoutRng};
use crate::world::CityWorld;

/// Resources are added with `init_resource`, so an app may insert its own
/// `LayoutConfig`, `LayoutRng`, `LayoutClock` or starting `CityWorld` before
/// adding the plugin.
pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LayoutConfig>()
            .init_resource::<LayoutRng>()
            .init_resource::<LayoutClock>()
            .init_resource::<CityWorld>()
            .init_resource::<BlueprintEditor>()
            .init_resource::<InteractionState>()
            .init_resource::<ActionQueue>()
            .init_resource::<ActionResultLog>()
            .add_event::<LayoutFailed>()
            .add_event::<BlueprintApplied>()
            .add_event::<RoadPathConfirmed>()
            .add_systems(Update, execute_queued_actions);
    }
}
