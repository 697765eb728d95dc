//! Error types for Arbor
//!
//! Uses `thiserror` for library errors. Dialog-level code never lets these
//! escape past the dialog that triggered them; see `application::dialog`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::{EntryReference, NameIssue};

/// Result type alias for Arbor operations
pub type BrowserResult<T> = Result<T, BrowserError>;

/// Main error type for browser operations
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Proposed file name failed validation
    #[error("invalid name '{name}': {issue}")]
    InvalidName { name: String, issue: NameIssue },

    /// The storage backend rejected a move, delete or create
    #[error("{reason}")]
    StorageFailure { path: PathBuf, reason: String },

    /// An entry reference no longer resolves in the current snapshot
    #[error("entry '{}' in root {} no longer exists", .reference.path, .reference.root_index)]
    StaleReference { reference: EntryReference },

    /// The operation is not permitted on this entry
    #[error("cannot modify '{path}': {reason}")]
    Unsupported { path: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or settings file could not be parsed
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl BrowserError {
    /// Short machine-readable kind, used by event sinks
    pub fn kind(&self) -> &'static str {
        match self {
            BrowserError::InvalidName { .. } => "invalid_name",
            BrowserError::StorageFailure { .. } => "storage_failure",
            BrowserError::StaleReference { .. } => "stale_reference",
            BrowserError::Unsupported { .. } => "unsupported",
            BrowserError::Io(_) => "io",
            BrowserError::Config { .. } => "config",
        }
    }

    pub(crate) fn unsupported(path: &str, reason: impl Into<String>) -> Self {
        BrowserError::Unsupported {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
