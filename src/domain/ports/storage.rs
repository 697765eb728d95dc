//! Storage port - abstraction over the file tree being browsed
//!
//! Implementations:
//! - `LocalStorage` - the local disk
//! - `MemoryStorage` - in-memory tree for tests and previews

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors. `Display` output is shown to the user verbatim.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("File or folder already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    #[error("{0}")]
    Rejected(String),
}

impl StorageError {
    /// Classify an I/O error for `path`
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(path.to_path_buf())
            }
            std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(path.to_path_buf()),
            _ => StorageError::Io(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::from_io(err, Path::new(""))
    }
}

/// One child reported by `list_children`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    pub name: String,
    pub is_directory: bool,
}

impl StorageEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
        }
    }
}

/// Abstract storage interface
pub trait StorageBackend {
    /// Direct children of a directory
    fn list_children(&self, dir: &Path) -> StorageResult<Vec<StorageEntry>>;

    /// Member names of a composite file, `/`-separated for nested members.
    /// Plain files report no members.
    fn composite_members(&self, _file: &Path) -> StorageResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn exists(&self, path: &Path) -> bool;

    /// Move or rename a file or directory. Fails if `to` exists.
    fn move_entry(&self, from: &Path, to: &Path) -> StorageResult<()>;

    /// Delete a file, or a directory with everything below it
    fn delete(&self, path: &Path) -> StorageResult<()>;

    /// Create a directory and missing parents
    fn create_dir(&self, path: &Path) -> StorageResult<()>;

    /// Create or replace a file
    fn write_file(&self, path: &Path, contents: &[u8]) -> StorageResult<()>;

    /// Show the path in the system file manager
    fn reveal(&self, path: &Path) -> StorageResult<()>;
}
