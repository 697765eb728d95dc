//! Application Layer
//!
//! The two panels, as frame-driven state machines over the domain services.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Owns all per-panel UI state; there are no process-wide singletons
//!
//! ## Panels
//!
//! - `ResourceBrowser` - File tree with rename/move/delete/create dialogs
//! - `SceneHierarchy` - Scene rows with toggle, replace and range selection
//! - `PendingDialog` - Dialogs that open one frame after being requested

pub mod dialog;
pub mod resource_browser;
pub mod scene_hierarchy;

pub use dialog::{DialogOutcome, DialogPhase, PendingDialog};
pub use resource_browser::{BrowserCursor, CreateRequest, ResourceBrowser};
pub use scene_hierarchy::{node_title, object_label, HierarchyRow, SceneHierarchy};
