//! Scene hierarchy panel
//!
//! Produces the rows of one frame from the scene graph and the selection.
//! Every visited object is fed to the range selection engine in row order, so
//! a shift-click range always follows what the user sees.

use std::collections::HashSet;

use crate::config::settings::{read_int, write_int, PanelSettings};
use crate::domain::entities::{NodeId, SelectableObject, Selection};
use crate::domain::ports::{BrowserEvent, BrowserEventSink, NoopEventSink, SceneGraph};
use crate::domain::services::{
    ClickModifiers, ClickOutcome, RangeSelectionEngine, SceneSearch, SearchFilterCache,
};

pub const SHOW_COMPONENTS_KEY: &str = "SceneHierarchy.ShowComponents";
pub const SHOW_TEMPORARY_KEY: &str = "SceneHierarchy.ShowTemporary";

/// One rendered line of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRow {
    pub object: SelectableObject,
    pub depth: usize,
    pub label: String,
    pub selected: bool,
    pub active: bool,
    /// Has children or shown components, so it can be expanded
    pub expandable: bool,
    pub expanded: bool,
    pub temporary: bool,
}

/// Title of a node: its name, `Scene` for an unnamed root, else its id
pub fn node_title(graph: &dyn SceneGraph, node: NodeId) -> String {
    match graph.node_name(node) {
        Some(name) => name.to_string(),
        None if node == graph.root() => "Scene".to_string(),
        None => format!("Node {}", node.0),
    }
}

/// Label of any selectable object
pub fn object_label(graph: &dyn SceneGraph, object: SelectableObject) -> String {
    match object {
        SelectableObject::Node(node) => node_title(graph, node),
        SelectableObject::Component(component) => graph
            .component_type_name(component)
            .unwrap_or("Component")
            .to_string(),
    }
}

#[derive(Debug, Default)]
pub struct SceneHierarchy {
    show_components: bool,
    show_temporary: bool,
    expanded: HashSet<NodeId>,
    scene: Option<u64>,
    range: RangeSelectionEngine,
    search: SearchFilterCache<SelectableObject>,
}

impl SceneHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_components(&self) -> bool {
        self.show_components
    }

    pub fn set_show_components(&mut self, show: bool) {
        self.show_components = show;
    }

    pub fn show_temporary(&self) -> bool {
        self.show_temporary
    }

    pub fn set_show_temporary(&mut self, show: bool) {
        self.show_temporary = show;
    }

    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.expanded.contains(&node)
    }

    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) {
        if expanded {
            self.expanded.insert(node);
        } else {
            self.expanded.remove(&node);
        }
    }

    pub fn toggle_expanded(&mut self, node: NodeId) {
        let expanded = self.is_expanded(node);
        self.set_expanded(node, !expanded);
    }

    /// Expand every ancestor of `node` so it becomes visible
    pub fn reveal(&mut self, graph: &dyn SceneGraph, node: NodeId) {
        let mut current = graph.parent(node);
        while let Some(id) = current {
            self.expanded.insert(id);
            current = graph.parent(id);
        }
    }

    pub fn search(&self) -> &SearchFilterCache<SelectableObject> {
        &self.search
    }

    pub fn range(&self) -> &RangeSelectionEngine {
        &self.range
    }

    /// Handle a click on a row
    pub fn click(
        &mut self,
        selection: &mut Selection,
        object: SelectableObject,
        modifiers: ClickModifiers,
    ) -> ClickOutcome {
        self.range.on_click(selection, object, modifiers)
    }

    pub fn frame(
        &mut self,
        graph: &dyn SceneGraph,
        selection: &mut Selection,
        query: &str,
    ) -> Vec<HierarchyRow> {
        self.frame_with_events(graph, selection, query, &NoopEventSink)
    }

    /// Build this frame's rows, resolving a pending range request on the way
    pub fn frame_with_events(
        &mut self,
        graph: &dyn SceneGraph,
        selection: &mut Selection,
        query: &str,
        events: &dyn BrowserEventSink,
    ) -> Vec<HierarchyRow> {
        if self.scene != Some(graph.scene_id()) {
            // A different scene: forget the old expansion state
            if self.scene.is_some() {
                self.expanded.clear();
            }
            self.scene = Some(graph.scene_id());
            self.expanded.insert(graph.root());
        }

        selection.retain_existing(|object| graph.contains(object));
        self.search.update(&SceneSearch(graph), query);

        let mut rows = Vec::new();
        let mut visited = HashSet::new();
        self.range.begin_traversal();
        let active = selection.active();

        if self.search.is_active() {
            let results: Vec<NodeId> = self
                .search
                .results()
                .iter()
                .filter_map(|item| match *item {
                    SelectableObject::Node(node) => Some(node),
                    SelectableObject::Component(_) => None,
                })
                .collect();
            for node in results {
                if graph.contains(node.into())
                    && (self.show_temporary || !graph.is_temporary_effective(node))
                {
                    self.build_node(graph, selection, active, node, 0, &mut visited, &mut rows);
                }
            }
        } else {
            self.build_node(graph, selection, active, graph.root(), 0, &mut visited, &mut rows);
        }

        if let Some(count) = self.range.end_traversal(selection, graph) {
            events.on_event(BrowserEvent::RangeSelected { count });
            for row in &mut rows {
                row.selected = selection.is_selected(row.object);
            }
        }
        rows
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node(
        &mut self,
        graph: &dyn SceneGraph,
        selection: &Selection,
        active: Option<SelectableObject>,
        node: NodeId,
        depth: usize,
        visited: &mut HashSet<SelectableObject>,
        rows: &mut Vec<HierarchyRow>,
    ) {
        let object = SelectableObject::Node(node);
        let temporary = graph.is_temporary(object);
        if (temporary && !self.show_temporary) || !visited.insert(object) {
            return;
        }

        let children = graph.children(node);
        let components = if self.show_components {
            graph.components(node)
        } else {
            Vec::new()
        };
        let expanded = self.is_expanded(node);

        self.range.visit(object, active);
        rows.push(HierarchyRow {
            object,
            depth,
            label: node_title(graph, node),
            selected: selection.is_selected(object),
            active: active == Some(object),
            expandable: !children.is_empty() || !components.is_empty(),
            expanded,
            temporary,
        });
        if !expanded {
            return;
        }

        for component in components {
            let object = SelectableObject::Component(component);
            let temporary = graph.is_temporary(object);
            if temporary && !self.show_temporary {
                continue;
            }
            self.range.visit(object, active);
            rows.push(HierarchyRow {
                object,
                depth: depth + 1,
                label: object_label(graph, object),
                selected: selection.is_selected(object),
                active: active == Some(object),
                expandable: false,
                expanded: false,
                temporary,
            });
        }
        for child in children {
            self.build_node(graph, selection, active, child, depth + 1, visited, rows);
        }
    }
}

impl PanelSettings for SceneHierarchy {
    fn write_settings(&self, out: &mut String) {
        write_int(out, SHOW_COMPONENTS_KEY, i64::from(self.show_components));
        write_int(out, SHOW_TEMPORARY_KEY, i64::from(self.show_temporary));
    }

    fn read_setting_line(&mut self, line: &str) -> bool {
        if let Some(value) = read_int(line, SHOW_COMPONENTS_KEY) {
            self.show_components = value != 0;
            true
        } else if let Some(value) = read_int(line, SHOW_TEMPORARY_KEY) {
            self.show_temporary = value != 0;
            true
        } else {
            false
        }
    }
}
