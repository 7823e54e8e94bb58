//! Blueprint editing end to end: CSV import, auto-layout, validation, commit.

use crate::blueprints::{CSV_IMPORT_NAME, CURRENT_SECTOR_NAME};
use crate::buildings::BuildingKind;
use crate::error::LayoutError;
use crate::grid::CellType;
use crate::layout_actions::{ActionResult, LayoutAction};
use crate::synthesis::tower_height;
use crate::test_harness::{TestLayout, TEST_CLOCK_START};

const THREE_COMPANIES: &str = "Company,Description,Market Cap\n\
    Apex Dynamics,Chip foundry,$2.1T\n\
    Borealis Grid,\"Power, cooling\",850B\n\
    Cobalt Labs,,12.5\n";

fn import(layout: &mut TestLayout, csv: &str) -> ActionResult {
    layout.act(LayoutAction::ImportBuildingsCsv {
        text: csv.to_string(),
    })
}

#[test]
fn csv_import_opens_blueprint_over_current_city() {
    let mut layout = TestLayout::new();
    assert_eq!(import(&mut layout, THREE_COMPANIES), ActionResult::Success);

    let bp = layout.editor().blueprint().expect("editor should be open");
    assert_eq!(bp.name, CSV_IMPORT_NAME);
    assert_eq!(bp.id, format!("import-{TEST_CLOCK_START}"));
    assert_eq!(bp.source_metadata.len(), 3);
    assert_eq!(bp.source_metadata[1].description, "Power, cooling");
    // The hub is still drawn under the import.
    assert_eq!(bp.grid.count(CellType::Building), 4);
    // Nothing in the city changes until commit.
    layout.assert_building_count(1);
}

#[test]
fn csv_auto_layout_commit_builds_one_tower_per_record() {
    let mut layout = TestLayout::new();
    import(&mut layout, THREE_COMPANIES);
    assert_eq!(layout.act(LayoutAction::AutoLayout), ActionResult::Success);
    assert_eq!(layout.editor().building_groups().len(), 3);

    assert_eq!(layout.act(LayoutAction::CommitBlueprint), ActionResult::Success);
    assert!(!layout.editor().is_open());

    let towers = layout.buildings_of_kind(BuildingKind::Tower);
    assert_eq!(towers.len(), 3);
    layout.assert_building_count(3);
    layout.assert_ids_unique();

    let commit_stamp = TEST_CLOCK_START + 1;
    let apex = towers
        .iter()
        .find(|b| b.name.as_deref() == Some("Apex Dynamics"))
        .expect("first record should be mapped");
    assert_eq!(apex.id, format!("hub-{commit_stamp}-1-1"));
    assert_eq!(apex.description.as_deref(), Some("Chip foundry"));
    assert_eq!(apex.market_cap, Some(2.1));
    assert_eq!(apex.size[1], tower_height(36));

    let cobalt = towers
        .iter()
        .find(|b| b.name.as_deref() == Some("Cobalt Labs"))
        .unwrap();
    assert_eq!(cobalt.description.as_deref(), Some("Infrastructure node."));
    assert_eq!(cobalt.market_cap, Some(12.5));

    let applied = layout.take_applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].buildings, 3);
    assert_eq!(layout.grid().count(CellType::Building), 3 * 36);
}

#[test]
fn commit_with_wrong_group_count_is_blocked() {
    let mut layout = TestLayout::new();
    import(&mut layout, THREE_COMPANIES);
    layout.act(LayoutAction::ClearBlueprint);
    layout.paint(0, 0, CellType::Building);
    layout.paint(4, 4, CellType::Building);

    let result = layout.act(LayoutAction::CommitBlueprint);
    assert_eq!(
        result,
        ActionResult::Error(LayoutError::GroupCountMismatch {
            expected: 3,
            found: 2
        })
    );
    let failures = layout.take_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].action, "CommitBlueprint");
    assert!(failures[0].message.contains('3') && failures[0].message.contains('2'));

    // The city is untouched and the editor keeps the draft and the message.
    layout.assert_building_count(1);
    assert!(layout.editor().is_open());
    assert!(layout.editor().validation_error().is_some());

    // A third block makes the drawing match the dataset.
    layout.paint(8, 8, CellType::Building);
    assert!(layout.editor().validation_error().is_none());
    assert_eq!(layout.act(LayoutAction::CommitBlueprint), ActionResult::Success);
    layout.assert_building_count(3);
    let names: Vec<&str> = layout
        .city()
        .buildings()
        .iter()
        .filter_map(|b| b.name.as_deref())
        .collect();
    assert_eq!(names, vec!["Apex Dynamics", "Borealis Grid", "Cobalt Labs"]);
}

#[test]
fn auto_layout_without_records_fails() {
    let mut layout = TestLayout::new();
    layout.act(LayoutAction::OpenBlueprint);
    let result = layout.act(LayoutAction::AutoLayout);
    assert_eq!(result, ActionResult::Error(LayoutError::EmptyDataset));
    assert_eq!(
        layout.editor().validation_error(),
        Some("No data found in ingestion pool to auto-map.")
    );
}

#[test]
fn editor_actions_need_an_open_blueprint() {
    let mut layout = TestLayout::new();
    for action in [
        LayoutAction::PaintCell {
            row: 0,
            col: 0,
            tool: CellType::Road,
        },
        LayoutAction::AutoLayout,
        LayoutAction::CommitBlueprint,
        LayoutAction::CloseBlueprint,
    ] {
        assert_eq!(
            layout.act(action),
            ActionResult::Error(LayoutError::NoOpenBlueprint)
        );
        assert_eq!(layout.take_failures().len(), 1);
    }
}

#[test]
fn manual_blueprint_paints_ground_tiles() {
    let mut layout = TestLayout::empty();
    layout.act(LayoutAction::OpenBlueprint);
    assert_eq!(
        layout.editor().blueprint().unwrap().name,
        CURRENT_SECTOR_NAME
    );
    layout.paint(0, 0, CellType::Road);
    layout.paint(0, 1, CellType::Road);
    layout.paint(1, 0, CellType::Area);
    layout.paint(15, 15, CellType::Decor);
    // Toggle one road back off.
    layout.paint(0, 1, CellType::Road);

    assert_eq!(layout.act(LayoutAction::CommitBlueprint), ActionResult::Success);
    assert_eq!(layout.buildings_of_kind(BuildingKind::Road).len(), 1);
    assert_eq!(layout.buildings_of_kind(BuildingKind::Area).len(), 1);
    assert_eq!(layout.buildings_of_kind(BuildingKind::Decor).len(), 1);
    layout.assert_cell(0, 0, CellType::Road);
    layout.assert_cell(0, 1, CellType::Empty);
    layout.assert_cell(1, 0, CellType::Area);
    layout.assert_cell(15, 15, CellType::Decor);
    // Ground tiles are never tour stops.
    assert!(layout.city().current_tour_building().is_none());
}

#[test]
fn closing_the_editor_discards_the_draft() {
    let mut layout = TestLayout::new();
    import(&mut layout, THREE_COMPANIES);
    layout.act(LayoutAction::AutoLayout);
    assert_eq!(layout.act(LayoutAction::CloseBlueprint), ActionResult::Success);
    assert!(!layout.editor().is_open());
    layout.assert_building_count(1);
    assert_eq!(layout.city().buildings()[0].id, "1");
}

#[test]
fn header_only_csv_is_rejected() {
    let mut layout = TestLayout::new();
    let result = import(&mut layout, "Company,Market Cap\n\n");
    assert_eq!(
        result,
        ActionResult::Error(LayoutError::NotEnoughRows { found: 1 })
    );
    assert!(!layout.editor().is_open());
}
