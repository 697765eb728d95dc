//! Arbor - resource browser and scene hierarchy core
//!
//! Arbor keeps an editor's file browser and scene hierarchy consistent while
//! the things they show change underneath them: files are renamed and moved
//! on disk, the scene is edited, the user multi-selects with shift-clicks.
//!
//! The browser never holds on to tree nodes across a frame. Every panel keeps
//! `EntryReference`s and resolves them against the snapshot rebuilt at the top
//! of the frame, so a rename or an external change can only ever make a
//! reference stale, never dangling.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ResourceBrowser, SceneHierarchy};
pub use config::{BrowserConfig, RootConfig, SettingsFile};
pub use domain::entities::{Entry, EntryKind, NodeId, ResourceRoot, SelectableObject, Selection};
pub use domain::ports::{BrowserEvent, BrowserEventSink, SceneGraph, StorageBackend};
pub use domain::services::{EntryOperations, FactoryRegistry, TreeModel};
pub use domain::value_objects::EntryReference;
pub use error::{BrowserError, BrowserResult};
pub use infrastructure::{LocalStorage, MemoryStorage, SceneTree};
