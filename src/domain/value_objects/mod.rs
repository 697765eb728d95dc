//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod entry_ref;
mod name_check;
pub mod resource_path;

pub use entry_ref::EntryReference;
pub use name_check::{check_file_name, NameIssue};
