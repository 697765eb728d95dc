use std::path::Path;

use anyhow::{Context, Result};
use arbor::domain::ports::SceneGraph;
use arbor::presentation::output::{render_rows, rows_to_json};
use arbor::{SceneHierarchy, SceneTree, Selection};

use super::{emit_complete, GlobalOptions};

pub struct SceneOptions<'a> {
    pub find: Option<&'a str>,
    pub components: bool,
    pub temporary: bool,
    pub collapsed: bool,
}

pub fn cmd_scene(file: &Path, scene_options: &SceneOptions<'_>, options: &GlobalOptions) -> Result<()> {
    let scene = SceneTree::load(file).with_context(|| format!("loading scene {}", file.display()))?;
    let events = options.event_sink();

    let mut hierarchy = SceneHierarchy::new();
    hierarchy.set_show_components(scene_options.components);
    hierarchy.set_show_temporary(scene_options.temporary);
    if !scene_options.collapsed {
        for node in scene.descendants(scene.root()) {
            hierarchy.set_expanded(node, true);
        }
    }

    let mut selection = Selection::new();
    let query = scene_options.find.unwrap_or_default();
    let rows = hierarchy.frame_with_events(&scene, &mut selection, query, events.as_ref());

    if options.json {
        emit_complete(
            "scene",
            serde_json::json!({
                "scene": scene.scene_id(),
                "nodes": scene.node_count(),
                "rows": rows_to_json(&rows),
            }),
        )
    } else {
        print!("{}", render_rows(&rows, true));
        Ok(())
    }
}
