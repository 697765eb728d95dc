//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Entry` / `TreeSnapshot` - one rebuilt reflection of a root's tree
//! - `ResourceRoot` - a top-level namespace owning its snapshot
//! - `SelectableObject` / `Selection` - scene objects picked in the hierarchy

mod entry;
mod root;
mod selection;

pub use entry::{Entry, EntryKind, TreeSnapshot};
pub use root::ResourceRoot;
pub use selection::{ComponentId, NodeId, SelectableObject, Selection};
