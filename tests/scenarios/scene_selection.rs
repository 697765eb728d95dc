//! Multi-selection in the scene hierarchy

use arbor::domain::entities::ComponentId;
use arbor::domain::ports::BrowserEvent;
use arbor::domain::services::{ClickModifiers, ClickOutcome};
use arbor::infrastructure::RecordingEventSink;
use arbor::{NodeId, SceneGraph, SceneHierarchy, SceneTree, SelectableObject, Selection};

/// ```text
/// Scene
///   World            (Light component)
///     Terrain
///     Trees
///       Oak
///       Pine
///   Camera
///   Gizmo            (temporary)
/// ```
struct Level {
    scene: SceneTree,
    world: NodeId,
    terrain: NodeId,
    trees: NodeId,
    oak: NodeId,
    pine: NodeId,
    camera: NodeId,
    light: ComponentId,
}

fn level() -> Level {
    let mut scene = SceneTree::new();
    let root = scene.root();
    let world = scene.add_node(root, "World");
    let light = scene.add_component(world, "Light").unwrap();
    let terrain = scene.add_node(world, "Terrain");
    let trees = scene.add_node(world, "Trees");
    let oak = scene.add_node(trees, "Oak");
    let pine = scene.add_node(trees, "Pine");
    let camera = scene.add_node(root, "Camera");
    let gizmo = scene.add_node(root, "Gizmo");
    scene.set_temporary(gizmo, true);
    Level {
        scene,
        world,
        terrain,
        trees,
        oak,
        pine,
        camera,
        light,
    }
}

fn labels(rows: &[arbor::application::HierarchyRow]) -> Vec<&str> {
    rows.iter().map(|row| row.label.as_str()).collect()
}

fn selected(selection: &Selection, scene: &SceneTree) -> Vec<String> {
    let mut names: Vec<String> = selection
        .iter()
        .map(|object| arbor::application::object_label(scene, object))
        .collect();
    names.sort();
    names
}

/// SCENARIO: Shift-click across nested, expanded nodes
#[test]
fn scenario_range_follows_visible_order() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();
    panel.set_expanded(l.world, true);
    panel.set_expanded(l.trees, true);

    let rows = panel.frame(&l.scene, &mut selection, "");
    assert_eq!(
        labels(&rows),
        vec!["Scene", "World", "Terrain", "Trees", "Oak", "Pine", "Camera"]
    );

    panel.click(&mut selection, l.pine.into(), ClickModifiers::none());
    panel.frame(&l.scene, &mut selection, "");
    let outcome = panel.click(&mut selection, l.terrain.into(), ClickModifiers::shift());
    assert_eq!(outcome, ClickOutcome::RangeRequested);

    let events = RecordingEventSink::new();
    let rows = panel.frame_with_events(&l.scene, &mut selection, "", &events);

    assert_eq!(selected(&selection, &l.scene), vec!["Oak", "Pine", "Terrain", "Trees"]);
    assert_eq!(selection.active(), Some(SelectableObject::Node(l.pine)));
    assert_eq!(events.events(), vec![BrowserEvent::RangeSelected { count: 4 }]);
    // Rows of the committing frame already show the new selection
    let selected_rows: Vec<_> = rows.iter().filter(|row| row.selected).map(|row| row.label.as_str()).collect();
    assert_eq!(selected_rows, vec!["Terrain", "Trees", "Oak", "Pine"]);
}

/// SCENARIO: Components are part of the range when they are shown
#[test]
fn scenario_range_includes_shown_components() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();
    panel.set_show_components(true);
    panel.set_expanded(l.world, true);

    panel.click(&mut selection, l.world.into(), ClickModifiers::none());
    panel.frame(&l.scene, &mut selection, "");
    panel.click(&mut selection, l.terrain.into(), ClickModifiers::shift());
    panel.frame(&l.scene, &mut selection, "");

    assert!(selection.is_selected(SelectableObject::Component(l.light)));
    assert_eq!(selected(&selection, &l.scene), vec!["Light", "Terrain", "World"]);
}

/// SCENARIO: The anchor is collapsed away before the range resolves
#[test]
fn scenario_collapsed_anchor_cancels_range() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();
    panel.set_expanded(l.world, true);
    panel.set_expanded(l.trees, true);

    panel.click(&mut selection, l.oak.into(), ClickModifiers::none());
    panel.frame(&l.scene, &mut selection, "");
    panel.click(&mut selection, l.camera.into(), ClickModifiers::shift());
    panel.set_expanded(l.trees, false);
    panel.frame(&l.scene, &mut selection, "");

    assert_eq!(selected(&selection, &l.scene), vec!["Oak"]);

    // With the anchor invisible, the next shift-click is a plain click
    let outcome = panel.click(&mut selection, l.camera.into(), ClickModifiers::shift());
    assert_eq!(outcome, ClickOutcome::Replaced);
    assert_eq!(selected(&selection, &l.scene), vec!["Camera"]);
}

/// SCENARIO: Typing a search query, one character at a time
#[test]
fn scenario_search_lists_matches_flat() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();

    let rows = panel.frame(&l.scene, &mut selection, "t");
    // Matches are listed at the top level, collapsed unless expanded before
    assert_eq!(labels(&rows), vec!["Terrain", "Trees"]);
    assert!(rows.iter().all(|row| row.depth == 0));

    panel.set_expanded(l.trees, true);
    let rows = panel.frame(&l.scene, &mut selection, "tr");
    assert_eq!(labels(&rows), vec!["Trees", "Oak", "Pine"]);
    assert_eq!(rows[1].depth, 1);

    let rows = panel.frame(&l.scene, &mut selection, "");
    assert_eq!(labels(&rows), vec!["Scene", "World", "Camera"]);
}

/// SCENARIO: Temporary objects only appear on request
#[test]
fn scenario_temporary_objects_are_opt_in() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();

    assert!(!labels(&panel.frame(&l.scene, &mut selection, "")).contains(&"Gizmo"));
    panel.set_show_temporary(true);
    let rows = panel.frame(&l.scene, &mut selection, "");
    let gizmo = rows.iter().find(|row| row.label == "Gizmo").unwrap();
    assert!(gizmo.temporary);
}

/// SCENARIO: Searching for a temporary object with temporary objects shown
#[test]
fn scenario_search_finds_temporary_objects_when_shown() {
    let l = level();
    let mut panel = SceneHierarchy::new();
    let mut selection = Selection::new();

    assert!(panel.frame(&l.scene, &mut selection, "giz").is_empty());

    panel.set_show_temporary(true);
    let rows = panel.frame(&l.scene, &mut selection, "giz");
    assert_eq!(labels(&rows), vec!["Gizmo"]);
    assert!(rows[0].temporary);
}
