//! Deferred modal dialogs
//!
//! A dialog requested while a click is being handled must not open in the
//! same frame, or it would steal input from the click. `request` only marks
//! the dialog as pending; the panel calls `open_if_pending` at a fixed point
//! at the top of the next frame.

/// Lifecycle of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Closed,
    OpenPending,
    Open,
}

/// What confirming a dialog did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The operation ran and the dialog closed
    Committed,
    /// The operation was refused; the dialog stays open showing the reason
    Rejected(String),
    /// Nothing to confirm, or the target vanished and the dialog closed
    Dismissed,
}

/// A dialog about `T`, with an editable text buffer and an error line
#[derive(Debug, Clone)]
pub struct PendingDialog<T> {
    phase: DialogPhase,
    target: Option<T>,
    input: String,
    error: Option<String>,
}

impl<T> Default for PendingDialog<T> {
    fn default() -> Self {
        Self {
            phase: DialogPhase::Closed,
            target: None,
            input: String::new(),
            error: None,
        }
    }
}

impl<T> PendingDialog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the dialog to open next frame, replacing any previous request
    pub fn request(&mut self, target: T, input: impl Into<String>) {
        self.phase = DialogPhase::OpenPending;
        self.target = Some(target);
        self.input = input.into();
        self.error = None;
    }

    /// Open a pending dialog; returns true if it opened now
    pub fn open_if_pending(&mut self) -> bool {
        if self.phase == DialogPhase::OpenPending {
            self.phase = DialogPhase::Open;
            true
        } else {
            false
        }
    }

    /// Close without side effects, handing back the target
    pub fn cancel(&mut self) -> Option<T> {
        self.phase = DialogPhase::Closed;
        self.input.clear();
        self.error = None;
        self.target.take()
    }

    /// Keep the dialog open and show `reason`
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }

    pub fn is_closed(&self) -> bool {
        self.phase == DialogPhase::Closed
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the text buffer; clears a stale error
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }
}
