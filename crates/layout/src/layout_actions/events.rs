//! Outcome events fired by the executor.

use bevy::prelude::*;

/// An action was rejected and changed nothing.
#[derive(Event, Debug, Clone)]
pub struct LayoutFailed {
    pub action: &'static str,
    pub message: String,
}

/// A committed blueprint replaced the city's buildings.
#[derive(Event, Debug, Clone)]
pub struct BlueprintApplied {
    pub blueprint_id: String,
    pub name: String,
    pub buildings: usize,
}

/// Road segments were laid along a confirmed waypoint path.
#[derive(Event, Debug, Clone)]
pub struct RoadPathConfirmed {
    pub waypoints: usize,
    pub segments: usize,
}
