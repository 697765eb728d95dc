//! Browser Event Port
//!
//! Provides an observable interface for tree rebuilds and entry operations.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted by the panels and their services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// A root was re-read from storage
    TreeRebuilt { root: String, entries: usize },

    /// A directory could not be listed during a rebuild
    ListingFailed { path: String, reason: String },

    EntryRenamed {
        from: String,
        to: String,
        remapped: usize,
    },

    EntryMoved {
        from: String,
        to: String,
        remapped: usize,
    },

    EntryDeleted { path: String, removed: usize },

    EntryCreated { path: String, factory: String },

    /// A rename/move/delete/create was refused
    OperationRejected {
        operation: &'static str,
        path: String,
        reason: String,
    },

    CacheInvalidated { key: String },

    /// A shift-click range was committed
    RangeSelected { count: usize },

    RevealRequested { path: String },
}

/// Trait for receiving browser events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable lines on stderr
/// - JsonEventSink: NDJSON event stream
/// - NoopEventSink: Silent operation
pub trait BrowserEventSink {
    fn on_event(&self, event: BrowserEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BrowserEventSink for NoopEventSink {
    fn on_event(&self, _event: BrowserEvent) {}
}
