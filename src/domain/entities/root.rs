//! ResourceRoot entity - one top-level namespace of the resource browser

use std::path::PathBuf;

use super::entry::TreeSnapshot;

/// A watched set of directories presented as one tree
#[derive(Debug, Clone)]
pub struct ResourceRoot {
    pub name: String,
    pub open_by_default: bool,
    pub supports_composite_files: bool,
    /// Entries of read-only roots cannot be renamed, moved, deleted or created
    pub read_only: bool,
    /// Physical directories merged into this root, highest priority first
    pub watched_directories: Vec<PathBuf>,
    /// Directory receiving new top-level entries
    pub active_directory: PathBuf,
    pub(crate) snapshot: TreeSnapshot,
}

impl ResourceRoot {
    pub fn new(
        index: usize,
        name: impl Into<String>,
        watched_directories: Vec<PathBuf>,
        active_directory: Option<PathBuf>,
    ) -> Self {
        let active_directory = active_directory
            .or_else(|| watched_directories.first().cloned())
            .unwrap_or_default();
        Self {
            name: name.into(),
            open_by_default: false,
            supports_composite_files: false,
            read_only: false,
            snapshot: TreeSnapshot::new(index, Some(active_directory.clone())),
            watched_directories,
            active_directory,
        }
    }

    /// The current tree; replaced by every rebuild
    pub fn snapshot(&self) -> &TreeSnapshot {
        &self.snapshot
    }
}
