//! In-Memory Storage Implementation
//!
//! Implements the storage port over a path map. Used by tests and previews;
//! it records every mutating call in a journal and can be told to reject the
//! next mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::{StorageBackend, StorageEntry, StorageError, StorageResult};

#[derive(Debug, Clone)]
enum MemoryNode {
    Directory,
    File { contents: Vec<u8>, members: Vec<String> },
}

#[derive(Debug, Default)]
struct MemoryState {
    nodes: BTreeMap<PathBuf, MemoryNode>,
    journal: Vec<String>,
    fail_next: Option<String>,
}

impl MemoryState {
    fn ensure_parents(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.parent().is_none() || ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Directory);
        }
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.parent().is_none() || matches!(self.nodes.get(path), Some(MemoryNode::Directory))
    }

    fn take_failure(&mut self) -> StorageResult<()> {
        match self.fail_next.take() {
            Some(reason) => Err(StorageError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

/// Shared in-memory file tree
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Builder: add a directory and its parents
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Builder: add a file and its parent directories
    pub fn with_file(self, path: impl AsRef<Path>, contents: &[u8]) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder: add a composite file exposing `members`
    pub fn with_composite(self, path: impl AsRef<Path>, members: &[&str]) -> Self {
        let path = path.as_ref();
        let mut state = self.lock();
        state.ensure_parents(path);
        state.nodes.insert(
            path.to_path_buf(),
            MemoryNode::File {
                contents: Vec::new(),
                members: members.iter().map(|m| m.to_string()).collect(),
            },
        );
        drop(state);
        self
    }

    /// Add a directory behind the browser's back (not journaled)
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.ensure_parents(path);
        state.nodes.insert(path.to_path_buf(), MemoryNode::Directory);
    }

    /// Add a file behind the browser's back (not journaled)
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &[u8]) {
        let path = path.as_ref();
        let mut state = self.lock();
        state.ensure_parents(path);
        state.nodes.insert(
            path.to_path_buf(),
            MemoryNode::File {
                contents: contents.to_vec(),
                members: Vec::new(),
            },
        );
    }

    /// Remove a path and everything below it behind the browser's back
    pub fn remove_external(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.lock().nodes.retain(|p, _| !p.starts_with(path));
    }

    /// Make the next mutating call fail with `reason`
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.lock().fail_next = Some(reason.into());
    }

    /// Mutating calls received so far, e.g. `move /a -> /b`
    pub fn journal(&self) -> Vec<String> {
        self.lock().journal.clone()
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.lock().nodes.get(path.as_ref()) {
            Some(MemoryNode::File { contents, .. }) => Some(contents.clone()),
            _ => None,
        }
    }

    /// Every stored path in sorted order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().nodes.keys().cloned().collect()
    }
}

impl StorageBackend for MemoryStorage {
    fn list_children(&self, dir: &Path) -> StorageResult<Vec<StorageEntry>> {
        let state = self.lock();
        if dir.parent().is_some() && !state.nodes.contains_key(dir) {
            return Err(StorageError::NotFound(dir.to_path_buf()));
        }
        if !state.is_directory(dir) {
            return Err(StorageError::Rejected(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }
        Ok(state
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .filter_map(|(path, node)| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                Some(match node {
                    MemoryNode::Directory => StorageEntry::directory(name),
                    MemoryNode::File { .. } => StorageEntry::file(name),
                })
            })
            .collect())
    }

    fn composite_members(&self, file: &Path) -> StorageResult<Vec<String>> {
        match self.lock().nodes.get(file) {
            Some(MemoryNode::File { members, .. }) => Ok(members.clone()),
            Some(MemoryNode::Directory) => Ok(Vec::new()),
            None => Err(StorageError::NotFound(file.to_path_buf())),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().nodes.contains_key(path)
    }

    fn move_entry(&self, from: &Path, to: &Path) -> StorageResult<()> {
        let mut state = self.lock();
        state.take_failure()?;
        if !state.nodes.contains_key(from) {
            return Err(StorageError::NotFound(from.to_path_buf()));
        }
        if state.nodes.contains_key(to) {
            return Err(StorageError::AlreadyExists(to.to_path_buf()));
        }
        if let Some(parent) = to.parent() {
            if !state.is_directory(parent) {
                return Err(StorageError::NotFound(parent.to_path_buf()));
            }
        }
        let moved: Vec<PathBuf> = state
            .nodes
            .keys()
            .filter(|path| path.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = state.nodes.remove(&old) {
                let new = match old.strip_prefix(from) {
                    Ok(suffix) if !suffix.as_os_str().is_empty() => to.join(suffix),
                    _ => to.to_path_buf(),
                };
                state.nodes.insert(new, node);
            }
        }
        state
            .journal
            .push(format!("move {} -> {}", from.display(), to.display()));
        Ok(())
    }

    fn delete(&self, path: &Path) -> StorageResult<()> {
        let mut state = self.lock();
        state.take_failure()?;
        if !state.nodes.contains_key(path) {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        state.nodes.retain(|p, _| !p.starts_with(path));
        state.journal.push(format!("delete {}", path.display()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> StorageResult<()> {
        let mut state = self.lock();
        state.take_failure()?;
        if let Some(MemoryNode::File { .. }) = state.nodes.get(path) {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }
        state.ensure_parents(path);
        state.nodes.insert(path.to_path_buf(), MemoryNode::Directory);
        state.journal.push(format!("mkdir {}", path.display()));
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> StorageResult<()> {
        let mut state = self.lock();
        state.take_failure()?;
        if state.is_directory(path) && state.nodes.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }
        state.ensure_parents(path);
        state.nodes.insert(
            path.to_path_buf(),
            MemoryNode::File {
                contents: contents.to_vec(),
                members: Vec::new(),
            },
        );
        state.journal.push(format!("write {}", path.display()));
        Ok(())
    }

    fn reveal(&self, path: &Path) -> StorageResult<()> {
        let mut state = self.lock();
        if !state.nodes.contains_key(path) {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        state.journal.push(format!("reveal {}", path.display()));
        Ok(())
    }
}
