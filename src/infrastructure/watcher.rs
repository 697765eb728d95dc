//! File system change notifications
//!
//! The watcher only reports which paths changed. The browser reacts by
//! marking its tree dirty, so a burst of changes costs a single rebuild at
//! the next frame.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{BrowserError, BrowserResult};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Collects changed paths until they have been quiet for `DEBOUNCE_MS`
#[derive(Debug, Default)]
pub struct ChangeDebouncer {
    pending: BTreeSet<PathBuf>,
    last_change: Option<Instant>,
}

impl ChangeDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_change(&mut self, path: PathBuf) {
        self.add_change_at(path, Instant::now());
    }

    pub fn add_change_at(&mut self, path: PathBuf, at: Instant) {
        self.pending.insert(path);
        self.last_change = Some(at);
    }

    pub fn is_settled_at(&self, now: Instant) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending.is_empty()
                    && now.saturating_duration_since(last) >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take the pending paths, sorted and deduplicated
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        self.last_change = None;
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

/// Recursive watcher over a set of directories
pub struct ChangeWatcher {
    // Dropping the watcher stops notifications
    _watcher: RecommendedWatcher,
    rx: Receiver<PathBuf>,
    debouncer: ChangeDebouncer,
}

impl ChangeWatcher {
    /// Watch every existing directory in `dirs`
    pub fn new(dirs: &[PathBuf]) -> BrowserResult<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| BrowserError::Io(std::io::Error::other(e.to_string())))?;

        for dir in dirs.iter().filter(|dir| dir.is_dir()) {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .map_err(|e| BrowserError::Io(std::io::Error::other(e.to_string())))?;
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            debouncer: ChangeDebouncer::new(),
        })
    }

    /// Wait up to `timeout` for changes; returns a settled batch or nothing
    pub fn poll(&mut self, timeout: Duration) -> Vec<PathBuf> {
        if let Ok(path) = self.rx.recv_timeout(timeout) {
            self.debouncer.add_change(path);
            while let Ok(path) = self.rx.try_recv() {
                self.debouncer.add_change(path);
            }
        }
        if self.debouncer.is_settled_at(Instant::now()) {
            self.debouncer.take_changes()
        } else {
            Vec::new()
        }
    }
}
