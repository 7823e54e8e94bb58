use serde::{Deserialize, Serialize};

use crate::buildings::{Building, BuildingPatch};
use crate::connections::{Connection, ConnectionPatch};
use crate::grid::CellType;
use crate::interaction::InteractionMode;

/// Every mutation of the city, the editor or the interaction state goes
/// through one of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum LayoutAction {
    // -- Interaction --------------------------------------------------------
    Select {
        id: String,
    },
    SetMode {
        mode: InteractionMode,
    },
    /// Lay roads along the selected waypoints and leave road mode.
    ConfirmRoadPath,
    ResetRoadPath,
    TourNext,
    TourPrev,

    // -- Import -------------------------------------------------------------
    /// Parse building records and open them in the editor over the current
    /// city.
    ImportBuildingsCsv {
        text: String,
    },
    /// Parse link records and replace every connection with them.
    ImportLinksCsv {
        text: String,
    },
    /// Replace the buildings with a generated layout.
    IngestGenerated {
        json: String,
    },

    // -- Blueprint editor ---------------------------------------------------
    /// Open the current city in the editor.
    OpenBlueprint,
    PaintCell {
        row: usize,
        col: usize,
        tool: CellType,
    },
    ClearBlueprint,
    RenameBlueprint {
        name: String,
    },
    AutoLayout,
    /// Validate the open blueprint and rebuild the city from it.
    CommitBlueprint,
    CloseBlueprint,

    // -- Direct edits -------------------------------------------------------
    AddBuilding {
        building: Building,
    },
    UpdateBuilding {
        id: String,
        patch: BuildingPatch,
    },
    RemoveBuilding {
        id: String,
    },
    UpdateConnection {
        id: String,
        patch: ConnectionPatch,
    },
    RemoveConnection {
        id: String,
    },
    ReplaceCity {
        buildings: Vec<Building>,
        #[serde(default)]
        connections: Vec<Connection>,
    },
}

impl LayoutAction {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutAction::Select { .. } => "Select",
            LayoutAction::SetMode { .. } => "SetMode",
            LayoutAction::ConfirmRoadPath => "ConfirmRoadPath",
            LayoutAction::ResetRoadPath => "ResetRoadPath",
            LayoutAction::TourNext => "TourNext",
            LayoutAction::TourPrev => "TourPrev",
            LayoutAction::ImportBuildingsCsv { .. } => "ImportBuildingsCsv",
            LayoutAction::ImportLinksCsv { .. } => "ImportLinksCsv",
            LayoutAction::IngestGenerated { .. } => "IngestGenerated",
            LayoutAction::OpenBlueprint => "OpenBlueprint",
            LayoutAction::PaintCell { .. } => "PaintCell",
            LayoutAction::ClearBlueprint => "ClearBlueprint",
            LayoutAction::RenameBlueprint { .. } => "RenameBlueprint",
            LayoutAction::AutoLayout => "AutoLayout",
            LayoutAction::CommitBlueprint => "CommitBlueprint",
            LayoutAction::CloseBlueprint => "CloseBlueprint",
            LayoutAction::AddBuilding { .. } => "AddBuilding",
            LayoutAction::UpdateBuilding { .. } => "UpdateBuilding",
            LayoutAction::RemoveBuilding { .. } => "RemoveBuilding",
            LayoutAction::UpdateConnection { .. } => "UpdateConnection",
            LayoutAction::RemoveConnection { .. } => "RemoveConnection",
            LayoutAction::ReplaceCity { .. } => "ReplaceCity",
        }
    }
}
