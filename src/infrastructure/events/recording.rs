//! Recording Event Sink
//!
//! Keeps every event in memory. Used by tests and by callers that want to
//! inspect what a batch of operations did.

use crate::domain::ports::{BrowserEvent, BrowserEventSink};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RefCell<Vec<BrowserEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BrowserEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<BrowserEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl BrowserEventSink for RecordingEventSink {
    fn on_event(&self, event: BrowserEvent) {
        self.events.borrow_mut().push(event);
    }
}
