//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod browser_events;
pub mod resource_cache;
pub mod scene_graph;
pub mod storage;

pub use browser_events::{BrowserEvent, BrowserEventSink, NoopEventSink};
pub use resource_cache::{NullResourceCache, ResourceCache};
pub use scene_graph::SceneGraph;
pub use storage::{StorageBackend, StorageEntry, StorageError, StorageResult};
