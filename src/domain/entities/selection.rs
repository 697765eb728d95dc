//! Selection entity - scene objects picked in the hierarchy panel
//!
//! Objects are identified by id only. The selection never keeps an object
//! alive; destroyed objects are dropped by `retain_existing` at the start of
//! each frame.

use std::collections::HashSet;
use std::fmt;

/// Identity of a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Identity of a component attached to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

/// Anything the hierarchy can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectableObject {
    Node(NodeId),
    Component(ComponentId),
}

impl From<NodeId> for SelectableObject {
    fn from(id: NodeId) -> Self {
        SelectableObject::Node(id)
    }
}

impl From<ComponentId> for SelectableObject {
    fn from(id: ComponentId) -> Self {
        SelectableObject::Component(id)
    }
}

impl fmt::Display for SelectableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectableObject::Node(id) => write!(f, "node {}", id.0),
            SelectableObject::Component(id) => write!(f, "component {}", id.0),
        }
    }
}

/// Selected objects plus the active object used as range anchor
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<SelectableObject>,
    active: Option<SelectableObject>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, object: SelectableObject) -> bool {
        self.selected.contains(&object)
    }

    /// Add or remove one object; the active object is left alone
    pub fn set_selected(&mut self, object: SelectableObject, selected: bool) {
        if selected {
            self.selected.insert(object);
        } else {
            self.selected.remove(&object);
        }
    }

    /// Flip membership of one object
    pub fn toggle(&mut self, object: SelectableObject) {
        let selected = self.is_selected(object);
        self.set_selected(object, !selected);
    }

    /// Select exactly `object` and make it active
    pub fn replace_with(&mut self, object: SelectableObject) {
        self.selected.clear();
        self.selected.insert(object);
        self.active = Some(object);
    }

    /// Drop every member; the active object survives as the range anchor
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn active(&self) -> Option<SelectableObject> {
        self.active
    }

    pub fn set_active(&mut self, object: Option<SelectableObject>) {
        self.active = object;
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SelectableObject> + '_ {
        self.selected.iter().copied()
    }

    /// Forget objects that no longer exist, including the active one.
    /// Returns the number of dropped members.
    pub fn retain_existing(&mut self, exists: impl Fn(SelectableObject) -> bool) -> usize {
        let before = self.selected.len();
        self.selected.retain(|&object| exists(object));
        if self.active.is_some_and(|active| !exists(active)) {
            self.active = None;
        }
        before - self.selected.len()
    }
}
