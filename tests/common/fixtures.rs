//! Reusable project layouts and an in-memory browser harness.

use std::path::Path;

use arbor::domain::services::EntryOperations;
use arbor::infrastructure::{MemoryResourceCache, MemoryStorage, RecordingEventSink};
use arbor::{BrowserConfig, EntryReference, ResourceBrowser};

/// Project directory used by every in-memory fixture
pub const PROJECT_DIR: &str = "/p";

/// Index of the `Project` root in the default layout
pub const PROJECT_ROOT: usize = 1;

/// Standard project:
///
/// ```text
/// /p/cache/shader.bin
/// /p/Levels/forest.xml
/// /p/Levels/Old/cave.xml
/// /p/Models/tree.pak      (composite: trunk.mesh, leaves/summer.mesh)
/// /p/readme.md
/// ```
pub fn project_storage() -> MemoryStorage {
    MemoryStorage::new()
        .with_file("/p/cache/shader.bin", b"\0")
        .with_file("/p/Levels/forest.xml", b"<level/>")
        .with_file("/p/Levels/Old/cave.xml", b"<level/>")
        .with_composite("/p/Models/tree.pak", &["trunk.mesh", "leaves/summer.mesh"])
        .with_file("/p/readme.md", b"# readme")
}

/// Reference into the `Project` root
pub fn project(path: &str) -> EntryReference {
    EntryReference::new(PROJECT_ROOT, path)
}

/// Storage, cache and event recorder for one browser
pub struct Harness {
    pub storage: MemoryStorage,
    pub cache: MemoryResourceCache,
    pub events: RecordingEventSink,
}

impl Harness {
    pub fn new(storage: MemoryStorage) -> Self {
        Self {
            storage,
            cache: MemoryResourceCache::new(),
            events: RecordingEventSink::new(),
        }
    }

    pub fn project() -> Self {
        Self::new(project_storage())
    }

    pub fn ops(&self) -> EntryOperations<'_> {
        EntryOperations::new(&self.storage, &self.cache, &self.events)
    }

    /// Browser over the default layout, after its first frame
    pub fn browser(&self) -> ResourceBrowser {
        let dir = Path::new(PROJECT_DIR);
        let mut browser = ResourceBrowser::from_config(&BrowserConfig::for_project(dir), dir);
        browser.begin_frame(&self.ops());
        browser
    }

    /// Run one frame of `browser`
    pub fn frame(&self, browser: &mut ResourceBrowser) -> bool {
        browser.begin_frame(&self.ops())
    }
}

/// Resource paths of every entry in a root, in snapshot order
pub fn all_paths(browser: &ResourceBrowser, root_index: usize) -> Vec<String> {
    browser
        .tree()
        .root(root_index)
        .map(|root| {
            root.snapshot()
                .iter()
                .filter(|entry| !entry.is_root())
                .map(|entry| entry.path().to_string())
                .collect()
        })
        .unwrap_or_default()
}
