//! In-memory scene graph
//!
//! Backs the hierarchy panel in tests and in the `scene` command, which loads
//! a scene description from TOML.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::entities::{ComponentId, NodeId, SelectableObject};
use crate::domain::ports::SceneGraph;
use crate::error::{BrowserError, BrowserResult};

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<ComponentId>,
    temporary: bool,
}

#[derive(Debug, Clone)]
struct ComponentData {
    node: NodeId,
    type_name: String,
    temporary: bool,
}

/// Scene of named nodes with attached components.
///
/// Ids are never reused, so a removed object stays absent.
#[derive(Debug, Clone)]
pub struct SceneTree {
    id: u64,
    nodes: HashMap<NodeId, NodeData>,
    components: HashMap<ComponentId, ComponentData>,
    next_node: u32,
    next_component: u32,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    /// Empty scene: an unnamed root node with id 0
    pub fn new() -> Self {
        Self::with_id(1)
    }

    pub fn with_id(id: u64) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId(0),
            NodeData {
                name: String::new(),
                parent: None,
                children: Vec::new(),
                components: Vec::new(),
                temporary: false,
            },
        );
        Self {
            id,
            nodes,
            components: HashMap::new(),
            next_node: 1,
            next_component: 1,
        }
    }

    /// Add a child node; an unknown parent means the root
    pub fn add_node(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let parent = if self.nodes.contains_key(&parent) {
            parent
        } else {
            NodeId(0)
        };
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            NodeData {
                name: name.into(),
                parent: Some(parent),
                children: Vec::new(),
                components: Vec::new(),
                temporary: false,
            },
        );
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(id);
        }
        id
    }

    /// Attach a component; `None` if the node does not exist
    pub fn add_component(&mut self, node: NodeId, type_name: impl Into<String>) -> Option<ComponentId> {
        let data = self.nodes.get_mut(&node)?;
        let id = ComponentId(self.next_component);
        self.next_component += 1;
        data.components.push(id);
        self.components.insert(
            id,
            ComponentData {
                node,
                type_name: type_name.into(),
                temporary: false,
            },
        );
        Some(id)
    }

    /// Destroy a node with its subtree and components. The root stays.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        if node == self.root() || !self.nodes.contains_key(&node) {
            return false;
        }
        let mut doomed = self.descendants(node);
        doomed.push(node);
        if let Some(parent) = self.nodes.get(&node).and_then(|data| data.parent) {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.children.retain(|&child| child != node);
            }
        }
        for id in doomed {
            if let Some(data) = self.nodes.remove(&id) {
                for component in data.components {
                    self.components.remove(&component);
                }
            }
        }
        true
    }

    pub fn remove_component(&mut self, component: ComponentId) -> bool {
        let Some(data) = self.components.remove(&component) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(&data.node) {
            node.components.retain(|&c| c != component);
        }
        true
    }

    pub fn set_name(&mut self, node: NodeId, name: impl Into<String>) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.name = name.into();
        }
    }

    pub fn set_temporary(&mut self, object: impl Into<SelectableObject>, temporary: bool) {
        match object.into() {
            SelectableObject::Node(id) => {
                if let Some(data) = self.nodes.get_mut(&id) {
                    data.temporary = temporary;
                }
            }
            SelectableObject::Component(id) => {
                if let Some(data) = self.components.get_mut(&id) {
                    data.temporary = temporary;
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Build a scene from its TOML description
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let description: SceneDescription = toml::from_str(text)?;
        let mut scene = Self::with_id(description.id);
        let root = scene.root();
        scene.set_name(root, description.name);
        for component in description.components {
            scene.add_component(root, component);
        }
        for node in &description.nodes {
            scene.add_described(root, node);
        }
        Ok(scene)
    }

    pub fn load(path: &Path) -> BrowserResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text).map_err(|e| BrowserError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn add_described(&mut self, parent: NodeId, node: &NodeDescription) {
        let id = self.add_node(parent, node.name.clone());
        self.set_temporary(id, node.temporary);
        for component in &node.components {
            self.add_component(id, component.clone());
        }
        for child in &node.children {
            self.add_described(id, child);
        }
    }
}

impl SceneGraph for SceneTree {
    fn scene_id(&self) -> u64 {
        self.id
    }

    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn contains(&self, object: SelectableObject) -> bool {
        match object {
            SelectableObject::Node(id) => self.nodes.contains_key(&id),
            SelectableObject::Component(id) => self.components.contains_key(&id),
        }
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(&node)
            .map(|data| data.name.as_str())
            .filter(|name| !name.is_empty())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|data| data.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn components(&self, node: NodeId) -> Vec<ComponentId> {
        self.nodes
            .get(&node)
            .map(|data| data.components.clone())
            .unwrap_or_default()
    }

    fn component_type_name(&self, component: ComponentId) -> Option<&str> {
        self.components
            .get(&component)
            .map(|data| data.type_name.as_str())
    }

    fn is_temporary(&self, object: SelectableObject) -> bool {
        match object {
            SelectableObject::Node(id) => self.nodes.get(&id).is_some_and(|data| data.temporary),
            SelectableObject::Component(id) => {
                self.components.get(&id).is_some_and(|data| data.temporary)
            }
        }
    }
}

/// TOML scene file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDescription {
    #[serde(default = "default_scene_id")]
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    components: Vec<String>,
    #[serde(default)]
    nodes: Vec<NodeDescription>,
}

fn default_scene_id() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDescription {
    #[serde(default)]
    name: String,
    #[serde(default)]
    temporary: bool,
    #[serde(default)]
    components: Vec<String>,
    #[serde(default)]
    children: Vec<NodeDescription>,
}
