//! Action executor system: drains the [`ActionQueue`] every update and applies
//! each queued [`LayoutAction`], recording results in the [`ActionResultLog`].
//!
//! Each action runs to completion before the next one starts, so a blueprint
//! commit reads the grid, synthesizes and replaces the building list without
//! anything observing the world in between.

use bevy::prelude::*;

use crate::blueprints::{Blueprint, BlueprintEditor, CURRENT_SECTOR_NAME};
use crate::config::LayoutConfig;
use crate::csv_import::{
    parse_building_records, parse_link_records, BuildingHeaderAliases, LinkHeaderAliases,
};
use crate::error::LayoutError;
use crate::generated::buildings_from_generated_json;
use crate::interaction::{InteractionState, SelectOutcome};
use crate::rng::{LayoutClock, LayoutRng};
use crate::road_path::plan_road_path;
use crate::synthesis::synthesize;
use crate::world::CityWorld;

use super::result_log::ActionResultLog;
use super::{
    ActionQueue, ActionResult, BlueprintApplied, LayoutAction, LayoutFailed, RoadPathConfirmed,
};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
#[allow(clippy::too_many_arguments)]
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut world: ResMut<CityWorld>,
    mut editor: ResMut<BlueprintEditor>,
    mut interaction: ResMut<InteractionState>,
    mut rng: ResMut<LayoutRng>,
    mut clock: ResMut<LayoutClock>,
    config: Res<LayoutConfig>,
    mut failed: EventWriter<LayoutFailed>,
    mut applied: EventWriter<BlueprintApplied>,
    mut roads: EventWriter<RoadPathConfirmed>,
) {
    if queue.is_empty() {
        return;
    }
    let mut ctx = LayoutCtx {
        world: &mut world,
        editor: &mut editor,
        interaction: &mut interaction,
        rng: &mut rng,
        clock: &mut clock,
        config: &config,
    };

    for queued in queue.drain() {
        let result = match execute_single(&queued.action, &mut ctx) {
            Ok(effects) => {
                if let Some(ev) = effects.applied {
                    applied.send(ev);
                }
                if let Some(ev) = effects.roads {
                    roads.send(ev);
                }
                match effects.warning {
                    Some(w) => {
                        warn!("{}: {}", queued.action.name(), w);
                        ActionResult::SuccessWithWarning(w)
                    }
                    None => ActionResult::Success,
                }
            }
            Err(e) => {
                warn!("{} rejected: {}", queued.action.name(), e);
                failed.send(LayoutFailed {
                    action: queued.action.name(),
                    message: e.to_string(),
                });
                ActionResult::Error(e)
            }
        };
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Mutable view of everything an action may touch.
struct LayoutCtx<'a> {
    world: &'a mut CityWorld,
    editor: &'a mut BlueprintEditor,
    interaction: &'a mut InteractionState,
    rng: &'a mut LayoutRng,
    clock: &'a mut LayoutClock,
    config: &'a LayoutConfig,
}

/// Side results of a successful action.
#[derive(Default)]
struct Effects {
    warning: Option<String>,
    applied: Option<BlueprintApplied>,
    roads: Option<RoadPathConfirmed>,
}

impl Effects {
    fn none() -> Result<Self, LayoutError> {
        Ok(Self::default())
    }

    fn warning(message: String) -> Result<Self, LayoutError> {
        Ok(Self {
            warning: Some(message),
            ..Default::default()
        })
    }
}

fn execute_single(action: &LayoutAction, ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    match action {
        LayoutAction::Select { id } => execute_select(id, ctx),
        LayoutAction::SetMode { mode } => {
            ctx.interaction.set_mode(*mode);
            Effects::none()
        }
        LayoutAction::ConfirmRoadPath => execute_confirm_road_path(ctx),
        LayoutAction::ResetRoadPath => {
            ctx.interaction.reset_road_path();
            Effects::none()
        }
        LayoutAction::TourNext => {
            ctx.world.tour_next();
            Effects::none()
        }
        LayoutAction::TourPrev => {
            ctx.world.tour_prev();
            Effects::none()
        }
        LayoutAction::ImportBuildingsCsv { text } => execute_import_buildings(text, ctx),
        LayoutAction::ImportLinksCsv { text } => execute_import_links(text, ctx),
        LayoutAction::IngestGenerated { json } => {
            let buildings = buildings_from_generated_json(json)?;
            info!("Generated layout ingested: {} buildings", buildings.len());
            ctx.world.replace_buildings(buildings);
            Effects::none()
        }
        LayoutAction::OpenBlueprint => {
            let stamp = ctx.clock.stamp();
            let blueprint = Blueprint::from_world(
                format!("manual-{stamp}"),
                CURRENT_SECTOR_NAME.to_string(),
                ctx.world.buildings(),
                ctx.config,
                stamp,
            );
            ctx.editor.open(blueprint);
            Effects::none()
        }
        LayoutAction::PaintCell { row, col, tool } => {
            ctx.editor.paint(*row, *col, *tool)?;
            Effects::none()
        }
        LayoutAction::ClearBlueprint => {
            ctx.editor.clear()?;
            Effects::none()
        }
        LayoutAction::RenameBlueprint { name } => {
            ctx.editor.rename(name.clone())?;
            Effects::none()
        }
        LayoutAction::AutoLayout => {
            ctx.editor.auto_layout()?;
            Effects::none()
        }
        LayoutAction::CommitBlueprint => execute_commit_blueprint(ctx),
        LayoutAction::CloseBlueprint => {
            ctx.editor.close().ok_or(LayoutError::NoOpenBlueprint)?;
            Effects::none()
        }
        LayoutAction::AddBuilding { building } => {
            if ctx.world.building(&building.id).is_some() {
                return Err(LayoutError::DuplicateId(building.id.clone()));
            }
            ctx.world.add_building(building.clone());
            Effects::none()
        }
        LayoutAction::UpdateBuilding { id, patch } => {
            ctx.world.update_building(id, patch.clone())?;
            Effects::none()
        }
        LayoutAction::RemoveBuilding { id } => {
            ctx.world.remove_building(id)?;
            ctx.interaction.forget(id);
            Effects::none()
        }
        LayoutAction::UpdateConnection { id, patch } => {
            ctx.world.update_connection(id, patch.clone())?;
            Effects::none()
        }
        LayoutAction::RemoveConnection { id } => {
            ctx.world.remove_connection(id)?;
            Effects::none()
        }
        LayoutAction::ReplaceCity {
            buildings,
            connections,
        } => {
            ctx.world.replace_city(buildings.clone(), connections.clone());
            Effects::none()
        }
    }
}

// ---------------------------------------------------------------------------
// Individual action executors
// ---------------------------------------------------------------------------

fn execute_select(id: &str, ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    if ctx.world.building(id).is_none() {
        return Err(LayoutError::UnknownId(id.to_string()));
    }
    if let SelectOutcome::Linked(link) = ctx.interaction.select(id, ctx.world, ctx.rng, ctx.clock)
    {
        info!("Linked {} -> {} ({})", link.from_id, link.to_id, link.id);
        ctx.world.add_connection(link);
    }
    Effects::none()
}

fn execute_confirm_road_path(ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    let selected = ctx.interaction.road_waypoints().len();
    if selected < 2 {
        return Effects::warning(format!(
            "a road path needs at least 2 waypoints, {selected} selected"
        ));
    }

    let path = ctx.interaction.take_road_path();
    let stamp = ctx.clock.stamp();
    let segments = plan_road_path(&path, ctx.world.buildings(), stamp);
    let planned = (path.len() - 1) * 2;
    info!(
        "Road path confirmed: {} waypoints, {} segments",
        path.len(),
        segments.len()
    );

    let mut effects = Effects {
        roads: Some(RoadPathConfirmed {
            waypoints: path.len(),
            segments: segments.len(),
        }),
        ..Default::default()
    };
    if segments.len() < planned {
        effects.warning = Some(format!(
            "{} of {planned} road segments skipped: waypoint no longer exists",
            planned - segments.len()
        ));
    }
    ctx.world.extend_buildings(segments);
    Ok(effects)
}

fn execute_import_buildings(text: &str, ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    let records = parse_building_records(text, &BuildingHeaderAliases::default())?;
    let stamp = ctx.clock.stamp();
    let current = ctx.world.current_grid(ctx.config);
    let count = records.len();

    let blueprint =
        Blueprint::with_records(format!("import-{stamp}"), current.clone(), records, stamp)
            .merged_over(&current);
    ctx.editor.open(blueprint);
    info!("Imported {count} building records, blueprint open for mapping");
    Effects::none()
}

fn execute_import_links(text: &str, ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    let stamp = ctx.clock.stamp();
    let import = parse_link_records(
        text,
        &LinkHeaderAliases::default(),
        ctx.world.buildings(),
        stamp,
    )?;
    let skipped = import.skipped();
    info!(
        "Imported {} links from {} rows",
        import.links.len(),
        import.rows
    );
    ctx.world.replace_connections(import.links);

    if skipped > 0 {
        Effects::warning(format!(
            "{skipped} link rows skipped: company not found in the city"
        ))
    } else {
        Effects::none()
    }
}

fn execute_commit_blueprint(ctx: &mut LayoutCtx) -> Result<Effects, LayoutError> {
    let stamp = ctx.clock.stamp();
    let blueprint = ctx.editor.commit(stamp)?;
    let buildings = synthesize(&blueprint.grid, ctx.config.scale, stamp);
    let count = buildings.len();
    ctx.world.replace_buildings(buildings);
    ctx.editor.close();
    info!(
        "Blueprint '{}' applied: {} buildings ({} records mapped)",
        blueprint.name,
        count,
        blueprint.source_metadata.len()
    );

    Ok(Effects {
        applied: Some(BlueprintApplied {
            blueprint_id: blueprint.id,
            name: blueprint.name,
            buildings: count,
        }),
        ..Default::default()
    })
}
