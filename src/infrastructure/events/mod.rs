//! Event Sink Implementations
//!
//! Provides concrete implementations of BrowserEventSink:
//! - JsonEventSink: NDJSON output for scripting
//! - ConsoleEventSink: Human-readable lines on stderr
//! - RecordingEventSink: In-memory log

mod console;
mod json;
mod recording;

pub use console::{describe, ConsoleEventSink};
pub use json::{event_to_json, JsonEventSink};
pub use recording::RecordingEventSink;
