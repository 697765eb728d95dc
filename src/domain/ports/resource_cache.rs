//! Resource cache port
//!
//! The browser only ever invalidates. Keys are logical resource paths, and
//! invalidation happens strictly after the storage change succeeded.

/// Cache of loaded resources keyed by resource path
pub trait ResourceCache {
    fn invalidate(&self, resource_key: &str);
}

/// Cache that holds nothing
pub struct NullResourceCache;

impl ResourceCache for NullResourceCache {
    fn invalidate(&self, _resource_key: &str) {}
}
