//! Output Rendering
//!
//! Text output is meant for people and is stable enough to snapshot; JSON
//! output is meant for scripts and mirrors the same data.

use serde_json::{json, Value};

use crate::application::HierarchyRow;
use crate::domain::entities::{Entry, EntryKind, SelectableObject};
use crate::domain::services::TreeModel;
use crate::domain::value_objects::EntryReference;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Markers used in text output
struct Icons {
    expanded: &'static str,
    collapsed: &'static str,
    leaf: &'static str,
    selected: &'static str,
    active: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            expanded: "▾",
            collapsed: "▸",
            leaf: " ",
            selected: "●",
            active: "◆",
        }
    }

    fn ascii() -> Self {
        Self {
            expanded: "-",
            collapsed: "+",
            leaf: " ",
            selected: "*",
            active: "@",
        }
    }
}

/// Indented text rendering of a resource tree
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer {
    /// Deepest level printed below the root; `None` prints everything
    pub max_depth: Option<usize>,
}

impl TreeRenderer {
    /// The root's name followed by one line per entry, two spaces per level.
    /// Directories end with `/`, composite files with `:`.
    pub fn render_root(&self, tree: &TreeModel, root_index: usize) -> String {
        let Some(root) = tree.root(root_index) else {
            return String::new();
        };
        let mut out = format!("{}/\n", root.name);
        let top = root.snapshot().root_entry();
        for child in tree.children(top) {
            self.render_entry(tree, child, 1, &mut out);
        }
        out
    }

    fn render_entry(&self, tree: &TreeModel, entry: &Entry, depth: usize, out: &mut String) {
        if self.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&entry_label(entry));
        out.push('\n');
        for child in tree.children(entry) {
            self.render_entry(tree, child, depth + 1, out);
        }
    }
}

/// Name of an entry with its kind suffix
pub fn entry_label(entry: &Entry) -> String {
    match entry.kind() {
        EntryKind::Directory => format!("{}/", entry.name()),
        _ if entry.is_composite() => format!("{}:", entry.name()),
        _ => entry.name().to_string(),
    }
}

fn kind_name(entry: &Entry) -> &'static str {
    match entry.kind() {
        EntryKind::Directory => "directory",
        EntryKind::File if entry.is_composite() => "composite",
        EntryKind::File => "file",
        EntryKind::CompositeMember => "member",
    }
}

/// Nested JSON of a root: `{ "name", "kind", "path", "children": [...] }`
pub fn tree_to_json(tree: &TreeModel, root_index: usize) -> Value {
    let Some(root) = tree.root(root_index) else {
        return Value::Null;
    };
    let top = root.snapshot().root_entry();
    json!({
        "root": root.name,
        "read_only": root.read_only,
        "children": tree.children(top).map(|e| entry_to_json(tree, e)).collect::<Vec<_>>(),
    })
}

fn entry_to_json(tree: &TreeModel, entry: &Entry) -> Value {
    let mut value = json!({
        "name": entry.name(),
        "path": entry.path(),
        "kind": kind_name(entry),
    });
    if entry.has_children() {
        value["children"] = tree
            .children(entry)
            .map(|e| entry_to_json(tree, e))
            .collect::<Vec<_>>()
            .into();
    }
    value
}

/// One resource path per line, with kind suffixes; stale references are
/// skipped
pub fn render_paths(tree: &TreeModel, references: &[EntryReference]) -> String {
    let mut out = String::new();
    for entry in references.iter().filter_map(|r| tree.resolve(r)) {
        out.push_str(entry.path());
        match entry.kind() {
            EntryKind::Directory => out.push('/'),
            _ if entry.is_composite() => out.push(':'),
            _ => {}
        }
        out.push('\n');
    }
    out
}

pub fn paths_to_json(tree: &TreeModel, references: &[EntryReference]) -> Value {
    references
        .iter()
        .filter_map(|r| tree.resolve(r))
        .map(|entry| {
            json!({
                "root": entry.root_index(),
                "path": entry.path(),
                "kind": kind_name(entry),
            })
        })
        .collect::<Vec<_>>()
        .into()
}

/// Text rendering of hierarchy rows: expansion marker, label, then the
/// selection marker
pub fn render_rows(rows: &[HierarchyRow], unicode: bool) -> String {
    let icons = if unicode {
        Icons::unicode()
    } else {
        Icons::ascii()
    };
    let mut out = String::new();
    for row in rows {
        let marker = match (row.expandable, row.expanded) {
            (false, _) => icons.leaf,
            (true, true) => icons.expanded,
            (true, false) => icons.collapsed,
        };
        out.push_str(&"  ".repeat(row.depth));
        out.push_str(marker);
        out.push(' ');
        if let SelectableObject::Component(_) = row.object {
            out.push('[');
            out.push_str(&row.label);
            out.push(']');
        } else {
            out.push_str(&row.label);
        }
        if row.temporary {
            out.push_str(" (temporary)");
        }
        if row.active {
            out.push(' ');
            out.push_str(icons.active);
        } else if row.selected {
            out.push(' ');
            out.push_str(icons.selected);
        }
        out.push('\n');
    }
    out
}

pub fn rows_to_json(rows: &[HierarchyRow]) -> Value {
    rows.iter()
        .map(|row| {
            let (kind, id) = match row.object {
                SelectableObject::Node(node) => ("node", node.0),
                SelectableObject::Component(component) => ("component", component.0),
            };
            json!({
                "kind": kind,
                "id": id,
                "depth": row.depth,
                "label": row.label,
                "selected": row.selected,
                "active": row.active,
                "expanded": row.expanded,
                "temporary": row.temporary,
            })
        })
        .collect::<Vec<_>>()
        .into()
}
