//! Tree model service
//!
//! Owns every root and its current snapshot. Snapshots are only ever replaced
//! at a frame boundary: mutating operations call `mark_dirty`, and the panel
//! calls `rebuild_if_dirty` once at the top of the next frame, so any number
//! of dirty signals within a frame collapse into a single rebuild.
//!
//! A directory that exists in several watched directories of a root shows up
//! once, with its contents merged. Such entries are marked `is_merged`; they
//! cannot be renamed, moved or deleted, since storage only ever sees one of
//! their copies.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::domain::entities::{Entry, EntryKind, ResourceRoot, TreeSnapshot};
use crate::domain::ports::{StorageBackend, StorageEntry, StorageError};
use crate::domain::value_objects::{resource_path, EntryReference};

/// A directory or composite file that could not be read during a rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    pub root_index: usize,
    pub path: PathBuf,
    pub reason: String,
}

/// In-memory reflection of every root's tree
#[derive(Debug)]
pub struct TreeModel {
    roots: Vec<ResourceRoot>,
    dirty: bool,
    generation: u64,
}

impl TreeModel {
    /// New model; the first `rebuild_if_dirty` populates it
    pub fn new(roots: Vec<ResourceRoot>) -> Self {
        Self {
            roots,
            dirty: true,
            generation: 0,
        }
    }

    pub fn roots(&self) -> &[ResourceRoot] {
        &self.roots
    }

    pub fn root(&self, index: usize) -> Option<&ResourceRoot> {
        self.roots.get(index)
    }

    /// Look up an entry in the current snapshot
    pub fn resolve(&self, reference: &EntryReference) -> Option<&Entry> {
        self.roots
            .get(reference.root_index)
            .and_then(|root| root.snapshot.get(&reference.path))
    }

    pub fn reference_of(&self, entry: &Entry) -> EntryReference {
        entry.reference()
    }

    pub fn children<'a>(&'a self, entry: &'a Entry) -> impl Iterator<Item = &'a Entry> + 'a {
        self.roots
            .get(entry.root_index())
            .into_iter()
            .flat_map(move |root| root.snapshot.children(entry))
    }

    pub fn parent(&self, entry: &Entry) -> Option<&Entry> {
        self.roots
            .get(entry.root_index())
            .and_then(|root| root.snapshot.parent(entry))
    }

    /// Descendants of `entry` in pre-order, `entry` excluded
    pub fn descendants<'a>(&'a self, entry: &'a Entry) -> Vec<&'a Entry> {
        self.roots
            .get(entry.root_index())
            .map(|root| root.snapshot.descendants(entry))
            .unwrap_or_default()
    }

    /// Request a rebuild at the next frame boundary
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of rebuilds performed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild if any dirty signal arrived since the last rebuild
    pub fn rebuild_if_dirty(&mut self, storage: &dyn StorageBackend) -> Option<Vec<ListingFailure>> {
        if !self.dirty {
            return None;
        }
        Some(self.rebuild(storage))
    }

    /// Discard every snapshot and re-read all roots from storage.
    ///
    /// Entry identity is not preserved: callers re-resolve their references.
    pub fn rebuild(&mut self, storage: &dyn StorageBackend) -> Vec<ListingFailure> {
        let mut failures = Vec::new();
        for (index, root) in self.roots.iter_mut().enumerate() {
            root.snapshot = build_snapshot(index, root, storage, &mut failures);
        }
        self.dirty = false;
        self.generation += 1;
        failures
    }

    /// Physical location a child named `name` of `parent` would occupy
    pub fn location_for_child(&self, parent: &Entry, name: &str) -> Option<PathBuf> {
        if parent.kind() == EntryKind::CompositeMember {
            return None;
        }
        if parent.is_root() {
            let root = self.roots.get(parent.root_index())?;
            return Some(root.active_directory.join(name));
        }
        parent.location().map(|location| location.join(name))
    }

    /// Whether entries of `root_index` may be modified
    pub fn is_read_only(&self, root_index: usize) -> bool {
        self.roots
            .get(root_index)
            .map(|root| root.read_only)
            .unwrap_or(true)
    }
}

fn build_snapshot(
    index: usize,
    root: &ResourceRoot,
    storage: &dyn StorageBackend,
    failures: &mut Vec<ListingFailure>,
) -> TreeSnapshot {
    let mut snapshot = TreeSnapshot::new(index, Some(root.active_directory.clone()));
    let mut queue: VecDeque<(String, Vec<PathBuf>)> = VecDeque::new();
    queue.push_back((String::new(), root.watched_directories.clone()));

    while let Some((dir_path, locations)) = queue.pop_front() {
        // First watched directory wins on name clashes; directories of the
        // same name are merged.
        let mut merged: Vec<(StorageEntry, Vec<PathBuf>)> = Vec::new();
        for location in &locations {
            let children = match storage.list_children(location) {
                Ok(children) => children,
                Err(StorageError::NotFound(_)) if dir_path.is_empty() => continue,
                Err(err) => {
                    failures.push(ListingFailure {
                        root_index: index,
                        path: location.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            for child in children {
                let child_location = location.join(&child.name);
                match merged.iter().position(|(existing, _)| existing.name == child.name) {
                    Some(position) => {
                        let (existing, paths) = &mut merged[position];
                        if existing.is_directory && child.is_directory {
                            paths.push(child_location);
                        }
                    }
                    None => merged.push((child, vec![child_location])),
                }
            }
        }

        merged.sort_by(|(a, _), (b, _)| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.cmp(&b.name))
        });

        for (child, child_locations) in merged {
            let kind = if child.is_directory {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let primary = child_locations[0].clone();
            if !snapshot.insert(&dir_path, &child.name, kind, Some(primary.clone())) {
                continue;
            }
            let child_path = resource_path::join(&dir_path, &child.name);
            if child_locations.len() > 1 {
                snapshot.mark_merged(&child_path);
            }
            if child.is_directory {
                queue.push_back((child_path, child_locations));
            } else if root.supports_composite_files {
                insert_composite_members(index, &mut snapshot, &child_path, &primary, storage, failures);
            }
        }
    }

    snapshot
}

fn insert_composite_members(
    index: usize,
    snapshot: &mut TreeSnapshot,
    owner_path: &str,
    location: &std::path::Path,
    storage: &dyn StorageBackend,
    failures: &mut Vec<ListingFailure>,
) {
    let members = match storage.composite_members(location) {
        Ok(members) => members,
        Err(err) => {
            failures.push(ListingFailure {
                root_index: index,
                path: location.to_path_buf(),
                reason: err.to_string(),
            });
            return;
        }
    };
    for member in members {
        let mut parent = owner_path.to_string();
        for segment in resource_path::normalize(&member).split('/') {
            if segment.is_empty() {
                continue;
            }
            // Intermediate segments may already exist; insert refuses duplicates.
            snapshot.insert(&parent, segment, EntryKind::CompositeMember, None);
            parent = resource_path::join(&parent, segment);
        }
    }
}
