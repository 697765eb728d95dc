//! JSON Event Sink
//!
//! Outputs browser events as NDJSON for scripting and automation.

use crate::domain::ports::{BrowserEvent, BrowserEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of an event, one object per line
pub fn event_to_json(event: &BrowserEvent) -> serde_json::Value {
    match event {
        BrowserEvent::TreeRebuilt { root, entries } => serde_json::json!({
            "event": "tree_rebuilt",
            "root": root,
            "entries": entries,
        }),

        BrowserEvent::ListingFailed { path, reason } => serde_json::json!({
            "event": "listing_failed",
            "path": path,
            "reason": reason,
        }),

        BrowserEvent::EntryRenamed { from, to, remapped } => serde_json::json!({
            "event": "renamed",
            "from": from,
            "to": to,
            "remapped": remapped,
        }),

        BrowserEvent::EntryMoved { from, to, remapped } => serde_json::json!({
            "event": "moved",
            "from": from,
            "to": to,
            "remapped": remapped,
        }),

        BrowserEvent::EntryDeleted { path, removed } => serde_json::json!({
            "event": "deleted",
            "path": path,
            "removed": removed,
        }),

        BrowserEvent::EntryCreated { path, factory } => serde_json::json!({
            "event": "created",
            "path": path,
            "factory": factory,
        }),

        BrowserEvent::OperationRejected {
            operation,
            path,
            reason,
        } => serde_json::json!({
            "event": "rejected",
            "operation": operation,
            "path": path,
            "reason": reason,
        }),

        BrowserEvent::CacheInvalidated { key } => serde_json::json!({
            "event": "cache_invalidated",
            "key": key,
        }),

        BrowserEvent::RangeSelected { count } => serde_json::json!({
            "event": "range_selected",
            "count": count,
        }),

        BrowserEvent::RevealRequested { path } => serde_json::json!({
            "event": "reveal",
            "path": path,
        }),
    }
}

impl BrowserEventSink for JsonEventSink {
    fn on_event(&self, event: BrowserEvent) {
        self.write_event(event_to_json(&event));
    }
}
