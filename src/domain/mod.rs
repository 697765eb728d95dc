//! Domain Layer
//!
//! The browsing core of Arbor: trees, selection and the operations on them,
//! with every side effect behind a port.
//!
//! ## Structure
//!
//! - `entities/` - Entries, tree snapshots, roots, selection
//! - `value_objects/` - Entry references, resource paths, name validation
//! - `services/` - Tree model, rename/move/delete, factories, range selection, search
//! - `ports/` - Storage, resource cache, scene graph, event sink
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Storage and notifications go through trait-defined ports
//! 2. **References, not pointers** - Only `EntryReference`s outlive a rebuild
//! 3. **Frame boundaries** - Snapshots are replaced only by `TreeModel::rebuild`

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
