//! Console Event Sink
//!
//! Human-readable event lines on stderr, for `--verbose`.

use crate::domain::ports::{BrowserEvent, BrowserEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stderr() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

/// One-line description of an event
pub fn describe(event: &BrowserEvent) -> String {
    match event {
        BrowserEvent::TreeRebuilt { root, entries } => {
            format!("rebuilt {} ({} entries)", root, entries)
        }
        BrowserEvent::ListingFailed { path, reason } => {
            format!("cannot list {}: {}", path, reason)
        }
        BrowserEvent::EntryRenamed { from, to, remapped } => {
            format!("renamed {} -> {} ({} paths)", from, to, remapped)
        }
        BrowserEvent::EntryMoved { from, to, remapped } => {
            format!("moved {} -> {} ({} paths)", from, to, remapped)
        }
        BrowserEvent::EntryDeleted { path, removed } => {
            format!("deleted {} ({} entries)", path, removed)
        }
        BrowserEvent::EntryCreated { path, factory } => {
            format!("created {} with {}", path, factory)
        }
        BrowserEvent::OperationRejected {
            operation,
            path,
            reason,
        } => format!("{} {} rejected: {}", operation, path, reason),
        BrowserEvent::CacheInvalidated { key } => format!("invalidated {}", key),
        BrowserEvent::RangeSelected { count } => format!("selected range of {}", count),
        BrowserEvent::RevealRequested { path } => format!("reveal {}", path),
    }
}

impl BrowserEventSink for ConsoleEventSink {
    fn on_event(&self, event: BrowserEvent) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "arbor: {}", describe(&event));
        }
    }
}
