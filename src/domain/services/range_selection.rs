//! Shift-click range selection over an incrementally visited tree
//!
//! Only expanded nodes are visited in a frame, so whether both ends of a
//! range are reachable is unknown until the traversal is over. A shift-click
//! therefore only records a request. The next traversal scans from whichever
//! end it meets first to the other one, in traversal order, and the result is
//! committed at the end of that traversal only if both ends were met.
//!
//! Requests are one frame deep: a request made during a traversal is picked
//! up by the next `begin_traversal`, replacing nothing but the previous
//! pending request.

use crate::domain::entities::{SelectableObject, Selection};
use crate::domain::ports::SceneGraph;

/// Both ends of a pending range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelectionRequest {
    pub anchor: SelectableObject,
    pub target: SelectableObject,
}

impl RangeSelectionRequest {
    pub fn is_border(&self, object: SelectableObject) -> bool {
        object == self.anchor || object == self.target
    }
}

/// Observable state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    Idle,
    /// A request waits for the next traversal
    RequestPending,
    /// The current traversal is resolving a request
    Scanning {
        /// Whether the first border has been visited
        anchor_seen: bool,
    },
}

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ClickModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            shift: false,
        }
    }

    pub fn shift() -> Self {
        Self {
            ctrl: false,
            shift: true,
        }
    }
}

/// What a click did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Membership of the clicked object flipped
    Toggled,
    /// A range request was queued for the next traversal
    RangeRequested,
    /// The selection now holds only the clicked object
    Replaced,
}

#[derive(Debug, Default)]
pub struct RangeSelectionEngine {
    pending: Option<RangeSelectionRequest>,
    current: Option<RangeSelectionRequest>,
    scanning: bool,
    result: Vec<SelectableObject>,
    was_active_visible: bool,
    is_active_visible: bool,
}

impl RangeSelectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on `object`. Identical for nodes and components.
    pub fn on_click(
        &mut self,
        selection: &mut Selection,
        object: SelectableObject,
        modifiers: ClickModifiers,
    ) -> ClickOutcome {
        if modifiers.ctrl {
            selection.toggle(object);
            return ClickOutcome::Toggled;
        }
        if modifiers.shift && self.was_active_visible {
            if let Some(active) = selection.active().filter(|&active| active != object) {
                self.pending = Some(RangeSelectionRequest {
                    anchor: active,
                    target: object,
                });
                return ClickOutcome::RangeRequested;
            }
        }
        selection.replace_with(object);
        ClickOutcome::Replaced
    }

    /// Start a traversal: the pending request becomes current
    pub fn begin_traversal(&mut self) {
        self.is_active_visible = false;
        self.result.clear();
        self.scanning = false;
        self.current = self.pending.take();
    }

    /// Feed one visited object, in traversal order
    pub fn visit(&mut self, object: SelectableObject, active: Option<SelectableObject>) {
        if active == Some(object) {
            self.is_active_visible = true;
        }

        let Some(request) = self.current else {
            return;
        };
        let is_border = request.is_border(object);
        if is_border && !self.scanning {
            self.scanning = true;
            self.result.push(object);
        } else if is_border {
            // Second border: the range is closed, the rest of the traversal
            // contributes nothing.
            self.result.push(object);
            self.scanning = false;
            self.current = None;
        } else if self.scanning {
            self.result.push(object);
        }
    }

    /// Finish a traversal, committing a completed range.
    ///
    /// Returns the number of objects selected, or `None` if no range was
    /// completed this traversal. Destroyed objects are skipped.
    pub fn end_traversal(&mut self, selection: &mut Selection, graph: &dyn SceneGraph) -> Option<usize> {
        self.was_active_visible = self.is_active_visible;
        self.current = None;
        let completed = !self.scanning && !self.result.is_empty();
        self.scanning = false;
        let result = std::mem::take(&mut self.result);
        if !completed {
            return None;
        }

        selection.clear();
        let mut count = 0;
        for object in result.into_iter().filter(|&object| graph.contains(object)) {
            selection.set_selected(object, true);
            count += 1;
        }
        Some(count)
    }

    /// Whether the active object was visited by the last completed traversal
    pub fn was_active_visible(&self) -> bool {
        self.was_active_visible
    }

    pub fn pending(&self) -> Option<RangeSelectionRequest> {
        self.pending
    }

    pub fn state(&self) -> RangeState {
        if self.current.is_some() {
            RangeState::Scanning {
                anchor_seen: self.scanning,
            }
        } else if self.pending.is_some() {
            RangeState::RequestPending
        } else {
            RangeState::Idle
        }
    }
}
