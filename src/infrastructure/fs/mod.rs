//! Storage Implementations
//!
//! Concrete implementations of the storage port.

mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
