//! Local File System Implementation
//!
//! Implements the storage port for local disk operations.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use ignore::WalkBuilder;

use crate::domain::ports::{StorageBackend, StorageEntry, StorageError, StorageResult};

/// Local disk storage
///
/// Listings skip hidden files. With `respect_ignore_files`, entries excluded
/// by `.gitignore` / `.ignore` files are skipped as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage {
    respect_ignore_files: bool,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respect_ignore_files(mut self, enabled: bool) -> Self {
        self.respect_ignore_files = enabled;
        self
    }
}

impl StorageBackend for LocalStorage {
    fn list_children(&self, dir: &Path) -> StorageResult<Vec<StorageEntry>> {
        let metadata = std::fs::metadata(dir).map_err(|e| StorageError::from_io(e, dir))?;
        if !metadata.is_dir() {
            return Err(StorageError::Rejected(format!(
                "Not a directory: {}",
                dir.display()
            )));
        }

        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(true)
            .parents(self.respect_ignore_files)
            .ignore(self.respect_ignore_files)
            .git_ignore(self.respect_ignore_files)
            .git_exclude(self.respect_ignore_files)
            .git_global(false)
            .require_git(false)
            .build();

        let mut children = Vec::new();
        for result in walker {
            let entry = result.map_err(|e| StorageError::Rejected(e.to_string()))?;
            if entry.depth() == 0 {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks for the directory test
            let is_directory = entry.path().is_dir();
            children.push(StorageEntry { name, is_directory });
        }
        Ok(children)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn move_entry(&self, from: &Path, to: &Path) -> StorageResult<()> {
        if !from.exists() {
            return Err(StorageError::NotFound(from.to_path_buf()));
        }
        if to.exists() {
            return Err(StorageError::AlreadyExists(to.to_path_buf()));
        }
        std::fs::rename(from, to).map_err(|e| StorageError::from_io(e, from))
    }

    fn delete(&self, path: &Path) -> StorageResult<()> {
        let metadata =
            std::fs::symlink_metadata(path).map_err(|e| StorageError::from_io(e, path))?;
        let result = if metadata.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        };
        result.map_err(|e| StorageError::from_io(e, path))
    }

    fn create_dir(&self, path: &Path) -> StorageResult<()> {
        if path.exists() {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }
        std::fs::create_dir_all(path).map_err(|e| StorageError::from_io(e, path))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> StorageResult<()> {
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, parent))?;

        // Write next to the target, then rename over it
        let mut file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| StorageError::from_io(e, parent))?;
        file.write_all(contents)
            .map_err(|e| StorageError::from_io(e, path))?;
        file.persist(path)
            .map_err(|e| StorageError::from_io(e.error, path))?;
        Ok(())
    }

    fn reveal(&self, path: &Path) -> StorageResult<()> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        reveal_command(path)
            .spawn()
            .map(|_| ())
            .map_err(|e| StorageError::from_io(e, path))
    }
}

#[cfg(target_os = "windows")]
fn reveal_command(path: &Path) -> Command {
    let mut command = Command::new("explorer");
    command.arg(format!("/select,{}", path.display()));
    command
}

#[cfg(target_os = "macos")]
fn reveal_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg("-R").arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn reveal_command(path: &Path) -> Command {
    // xdg-open cannot select a file, so open its folder
    let folder = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    let mut command = Command::new("xdg-open");
    command.arg(folder);
    command
}
