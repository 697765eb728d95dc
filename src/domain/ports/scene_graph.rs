//! Scene graph port - the selectable-object source of the hierarchy panel
//!
//! Lookups are by id and return `None` for destroyed objects, so the panel
//! never assumes an object it saw last frame still exists.

use crate::domain::entities::{ComponentId, NodeId, SelectableObject};

pub trait SceneGraph {
    /// Identity of the scene, changes when a different scene is shown
    fn scene_id(&self) -> u64;

    /// The scene root node
    fn root(&self) -> NodeId;

    fn contains(&self, object: SelectableObject) -> bool;

    fn node_name(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child nodes in scene order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Components of a node in attachment order
    fn components(&self, node: NodeId) -> Vec<ComponentId>;

    fn component_type_name(&self, component: ComponentId) -> Option<&str>;

    /// Temporary flag of the object itself
    fn is_temporary(&self, object: SelectableObject) -> bool;

    /// Temporary flag of the node or any of its ancestors
    fn is_temporary_effective(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.is_temporary(SelectableObject::Node(id)) {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Every node below `node`, depth-first in scene order, `node` excluded
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        result
    }
}
