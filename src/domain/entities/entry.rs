//! Entry entity - one node of a browsed tree
//!
//! Entries live in a `TreeSnapshot` arena and are replaced wholesale on every
//! rebuild. Nothing outside the snapshot holds on to them; long-lived state
//! stores an `EntryReference` and resolves it on demand.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{resource_path, EntryReference};

/// What an entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
    /// Virtual entry inside a composite file; has no physical location
    CompositeMember,
}

/// One node of a root's tree
#[derive(Debug, Clone)]
pub struct Entry {
    root_index: usize,
    path: String,
    name: String,
    kind: EntryKind,
    parent: Option<usize>,
    children: Vec<usize>,
    location: Option<PathBuf>,
    composite: bool,
    merged: bool,
}

impl Entry {
    pub fn root_index(&self) -> usize {
        self.root_index
    }

    /// Logical resource path, empty for the root directory
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Physical location on the storage backend, `None` for composite members
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A file exposing virtual sub-entries
    pub fn is_composite(&self) -> bool {
        self.composite
    }

    /// A directory present in more than one watched directory; `location`
    /// is only the highest-priority copy
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Whether the entry can be expanded in a tree view
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn reference(&self) -> EntryReference {
        EntryReference::new(self.root_index, self.path.clone())
    }
}

/// Arena holding every entry of one root, indexed by logical path
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    entries: Vec<Entry>,
    by_path: HashMap<String, usize>,
}

impl TreeSnapshot {
    /// Create a snapshot containing only the root directory
    pub fn new(root_index: usize, root_location: Option<PathBuf>) -> Self {
        let root = Entry {
            root_index,
            path: String::new(),
            name: String::new(),
            kind: EntryKind::Directory,
            parent: None,
            children: Vec::new(),
            location: root_location,
            composite: false,
            merged: false,
        };
        let mut by_path = HashMap::new();
        by_path.insert(String::new(), 0);
        Self {
            entries: vec![root],
            by_path,
        }
    }

    pub fn root_entry(&self) -> &Entry {
        &self.entries[0]
    }

    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.by_path.get(path).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Number of entries, the root directory included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when only the root directory exists
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    pub fn children<'a>(&'a self, entry: &'a Entry) -> impl Iterator<Item = &'a Entry> + 'a {
        entry.children.iter().map(move |&index| &self.entries[index])
    }

    pub fn parent(&self, entry: &Entry) -> Option<&Entry> {
        entry.parent.map(|index| &self.entries[index])
    }

    /// All descendants of `entry` in pre-order, `entry` excluded
    pub fn descendants<'a>(&'a self, entry: &'a Entry) -> Vec<&'a Entry> {
        let mut result = Vec::new();
        let mut stack: Vec<usize> = entry.children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            let current = &self.entries[index];
            result.push(current);
            stack.extend(current.children.iter().rev().copied());
        }
        result
    }

    /// Every entry in arena order (parents before children)
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Insert a child under `parent_path`. Returns `false` if the parent does
    /// not exist or the child path is already taken.
    pub(crate) fn mark_merged(&mut self, path: &str) {
        if let Some(&index) = self.by_path.get(path) {
            self.entries[index].merged = true;
        }
    }

    pub(crate) fn insert(
        &mut self,
        parent_path: &str,
        name: &str,
        kind: EntryKind,
        location: Option<PathBuf>,
    ) -> bool {
        let Some(&parent_index) = self.by_path.get(parent_path) else {
            return false;
        };
        let path = resource_path::join(parent_path, name);
        if self.by_path.contains_key(&path) {
            return false;
        }
        let index = self.entries.len();
        let root_index = self.entries[parent_index].root_index;
        self.entries.push(Entry {
            root_index,
            path: path.clone(),
            name: name.to_string(),
            kind,
            parent: Some(parent_index),
            children: Vec::new(),
            location,
            composite: false,
            merged: false,
        });
        self.entries[parent_index].children.push(index);
        if kind == EntryKind::CompositeMember && self.entries[parent_index].kind == EntryKind::File {
            self.entries[parent_index].composite = true;
        }
        self.by_path.insert(path, index);
        true
    }
}
