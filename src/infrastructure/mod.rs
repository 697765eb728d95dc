//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Storage implementations (Local, Memory)
//! - `events/` - Event sinks (JSON, console, recording)
//! - `cache` - In-memory resource cache
//! - `scene` - In-memory scene graph
//! - `watcher` - notify-based change watcher

pub mod cache;
pub mod events;
pub mod fs;
pub mod scene;
pub mod watcher;

// Re-export for convenience
pub use cache::MemoryResourceCache;
pub use events::{ConsoleEventSink, JsonEventSink, RecordingEventSink};
pub use fs::{LocalStorage, MemoryStorage};
pub use scene::SceneTree;
pub use watcher::{ChangeDebouncer, ChangeWatcher};
