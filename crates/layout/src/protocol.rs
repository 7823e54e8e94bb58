//! Agent text protocol types for the `--agent` headless mode.
//!
//! External programs drive the layout over newline-delimited JSON on
//! stdin/stdout. Each command line carries a `cmd` tag; each response line
//! carries `protocol_version` and a `type` tag. The I/O loop itself lives in
//! `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingPatch;
use crate::grid::CellType;
use crate::interaction::InteractionMode;
use crate::layout_actions::{ActionResult, LayoutAction};
use crate::observation::LayoutObservation;

// ---------------------------------------------------------------------------
// Commands (stdin → layout)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Request the current observation snapshot.
    Observe,
    /// Click a building in the current interaction mode.
    Select { id: String },
    SetMode { mode: InteractionMode },
    /// Lay roads along the selected waypoints.
    ConfirmRoad,
    /// Building records CSV; opens the mapping blueprint.
    ImportBuildings { csv: String },
    /// Link records CSV; replaces all connections.
    ImportLinks { csv: String },
    /// Open the current city in the blueprint editor.
    OpenBlueprint,
    Paint { row: usize, col: usize, tool: CellType },
    AutoLayout,
    CommitBlueprint,
    /// JSON array produced by the layout generator.
    IngestGenerated { json: String },
    UpdateBuilding { id: String, patch: BuildingPatch },
    RemoveBuilding { id: String },
    /// Any other layout action.
    Act { action: LayoutAction },
    /// Several layout actions, executed in order.
    BatchAct { actions: Vec<LayoutAction> },
    Quit,
}

impl AgentCommand {
    /// The single layout action this command stands for, if any.
    pub fn into_action(self) -> Option<LayoutAction> {
        let action = match self {
            AgentCommand::Select { id } => LayoutAction::Select { id },
            AgentCommand::SetMode { mode } => LayoutAction::SetMode { mode },
            AgentCommand::ConfirmRoad => LayoutAction::ConfirmRoadPath,
            AgentCommand::ImportBuildings { csv } => LayoutAction::ImportBuildingsCsv { text: csv },
            AgentCommand::ImportLinks { csv } => LayoutAction::ImportLinksCsv { text: csv },
            AgentCommand::OpenBlueprint => LayoutAction::OpenBlueprint,
            AgentCommand::Paint { row, col, tool } => LayoutAction::PaintCell { row, col, tool },
            AgentCommand::AutoLayout => LayoutAction::AutoLayout,
            AgentCommand::CommitBlueprint => LayoutAction::CommitBlueprint,
            AgentCommand::IngestGenerated { json } => LayoutAction::IngestGenerated { json },
            AgentCommand::UpdateBuilding { id, patch } => LayoutAction::UpdateBuilding { id, patch },
            AgentCommand::RemoveBuilding { id } => LayoutAction::RemoveBuilding { id },
            AgentCommand::Act { action } => action,
            AgentCommand::Observe | AgentCommand::BatchAct { .. } | AgentCommand::Quit => {
                return None
            }
        };
        Some(action)
    }
}

// ---------------------------------------------------------------------------
// Responses (layout → stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponsePayload {
    Ready,
    Observation {
        observation: Box<LayoutObservation>,
    },
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
    },
    BatchResult {
        results: Vec<ActionResult>,
    },
    Error {
        message: String,
    },
    Goodbye,
}

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}

/// Response for a single executed action.
pub fn action_response(result: ActionResult) -> AgentResponse {
    make_response(match result {
        ActionResult::Success => ResponsePayload::Ok { warning: None },
        ActionResult::SuccessWithWarning(w) => ResponsePayload::Ok { warning: Some(w) },
        ActionResult::Error(e) => ResponsePayload::Error {
            message: e.to_string(),
        },
    })
}
