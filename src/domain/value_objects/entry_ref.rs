//! Entry Reference Value Object
//!
//! Root index plus logical resource path. Survives tree rebuilds because it
//! never points into a snapshot; it is re-resolved on every use.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::resource_path;

/// Stable address of one entry in one root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntryReference {
    pub root_index: usize,
    /// Logical `/`-separated path relative to the root; empty for the root itself
    pub path: String,
}

impl EntryReference {
    pub fn new(root_index: usize, path: impl Into<String>) -> Self {
        Self {
            root_index,
            path: path.into(),
        }
    }

    /// Reference to the root directory of `root_index`
    pub fn root(root_index: usize) -> Self {
        Self::new(root_index, String::new())
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Reference to the parent entry, `None` for the root directory
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self::new(
            self.root_index,
            resource_path::parent_of(&self.path),
        ))
    }

    /// Reference to a direct child named `name`
    pub fn child(&self, name: &str) -> Self {
        Self::new(self.root_index, resource_path::join(&self.path, name))
    }
}

impl fmt::Display for EntryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:/{}", self.root_index, self.path)
    }
}
