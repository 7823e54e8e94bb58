//! Buildings: every placed box in the world, from towers to flat road tiles.

use serde::{Deserialize, Serialize};

use crate::grid::CellType;

/// What a building is. Structural kinds are solid volumes resting on the
/// ground; `Area`, `Road` and `Decor` are ground-level dressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingKind {
    #[default]
    Generic,
    Gpu,
    Station,
    Warehouse,
    Tank,
    Hospital,
    Tower,
    Track,
    Collider,
    TechPark,
    Decor,
    Area,
    Road,
}

impl BuildingKind {
    pub fn is_structural(self) -> bool {
        !matches!(
            self,
            BuildingKind::Area | BuildingKind::Road | BuildingKind::Decor
        )
    }

    /// Projection order onto the blueprint grid: lower priorities are written
    /// first and overwritten by higher ones.
    pub fn grid_priority(self) -> u8 {
        match self {
            BuildingKind::Area => 0,
            BuildingKind::Road => 1,
            BuildingKind::Decor => 2,
            _ => 3,
        }
    }

    pub fn cell_type(self) -> CellType {
        match self {
            BuildingKind::Area => CellType::Area,
            BuildingKind::Road => CellType::Road,
            BuildingKind::Decor => CellType::Decor,
            _ => CellType::Building,
        }
    }
}

/// Operating figures reported by the layout generator, all percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingStats {
    pub occupancy: f32,
    pub energy: f32,
    pub stability: f32,
}

/// Business metadata attached to a building, one per imported record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingMetadata {
    pub name: String,
    pub description: String,
    pub market_cap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    /// World-space centre. For solid kinds `y` is half the height.
    pub position: [f32; 3],
    /// Width (X), height (Y), depth (Z).
    pub size: [f32; 3],
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BuildingStats>,
    #[serde(rename = "type", default)]
    pub kind: BuildingKind,
}

impl Building {
    /// Axis-aligned footprint on the ground plane as `(min_x, max_x, min_z, max_z)`.
    pub fn footprint(&self) -> (f32, f32, f32, f32) {
        let half_w = self.size[0] / 2.0;
        let half_d = self.size[2] / 2.0;
        (
            self.position[0] - half_w,
            self.position[0] + half_w,
            self.position[2] - half_d,
            self.position[2] + half_d,
        )
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Apply a partial update. Resizing a structural building keeps it
    /// standing on the ground.
    pub fn apply(&mut self, patch: BuildingPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
            if self.kind.is_structural() {
                self.position[1] = size[1] / 2.0;
            }
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(market_cap) = patch.market_cap {
            self.market_cap = Some(market_cap);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

/// Partial-field update for a [`Building`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingPatch {
    pub position: Option<[f32; 3]>,
    pub size: Option<[f32; 3]>,
    pub color: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub market_cap: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<BuildingKind>,
}
