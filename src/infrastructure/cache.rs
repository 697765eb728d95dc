//! In-memory resource cache
//!
//! Keeps loaded resource bytes by resource path and remembers every
//! invalidation, in order.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::domain::ports::ResourceCache;

#[derive(Debug, Default)]
pub struct MemoryResourceCache {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
    invalidated: RefCell<Vec<String>>,
}

impl MemoryResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, data: Vec<u8>) {
        self.entries.borrow_mut().insert(key.into(), data);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    /// Keys passed to `invalidate`, oldest first
    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.borrow().clone()
    }
}

impl ResourceCache for MemoryResourceCache {
    fn invalidate(&self, resource_key: &str) {
        self.entries.borrow_mut().remove(resource_key);
        self.invalidated.borrow_mut().push(resource_key.to_string());
    }
}
