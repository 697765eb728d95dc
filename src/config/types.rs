//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::ResourceRoot;
use crate::error::BrowserResult;

use super::loader::{self, ConfigWarning};

/// One resource root of the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub name: String,
    pub open_by_default: bool,
    /// Expose the members of composite files as child entries
    pub composite_files: bool,
    pub read_only: bool,
    /// Directories merged into the root, highest priority first
    pub watched_directories: Vec<PathBuf>,
    /// Where new top-level entries go; defaults to the first watched directory
    pub active_directory: Option<PathBuf>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            name: "Root".to_string(),
            open_by_default: false,
            composite_files: false,
            read_only: false,
            watched_directories: Vec::new(),
            active_directory: None,
        }
    }
}

impl RootConfig {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            watched_directories: vec![directory.into()],
            ..Self::default()
        }
    }

    /// Copy with relative directories resolved against `base`
    pub fn resolved(&self, base: &Path) -> Self {
        let resolve = |dir: &PathBuf| {
            if dir.is_relative() {
                base.join(dir)
            } else {
                dir.clone()
            }
        };
        Self {
            watched_directories: self.watched_directories.iter().map(resolve).collect(),
            active_directory: self.active_directory.as_ref().map(resolve),
            ..self.clone()
        }
    }

    pub fn into_root(self, index: usize) -> ResourceRoot {
        let mut root = ResourceRoot::new(
            index,
            self.name,
            self.watched_directories,
            self.active_directory,
        );
        root.open_by_default = self.open_by_default;
        root.supports_composite_files = self.composite_files;
        root.read_only = self.read_only;
        root
    }
}

/// Browser configuration (`arbor.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub roots: Vec<RootConfig>,
    /// Root shown in the left panel until settings say otherwise
    pub default_left_root: usize,
    /// Hide entries excluded by `.gitignore` / `.ignore` files
    pub respect_ignore_files: bool,
    /// Panel settings file; defaults to the user config directory
    pub settings_file: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            default_left_root: 1,
            respect_ignore_files: false,
            settings_file: None,
        }
    }
}

impl BrowserConfig {
    /// Default layout for a project directory: a read-only `Cache` root and
    /// the `Project` root itself.
    pub fn for_project(dir: &Path) -> Self {
        let cache = RootConfig {
            read_only: true,
            ..RootConfig::new("Cache", dir.join("cache"))
        };
        let project = RootConfig {
            open_by_default: true,
            composite_files: true,
            ..RootConfig::new("Project", dir)
        };
        Self {
            roots: vec![cache, project],
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BrowserResult<Self> {
        loader::load_with_warnings(path).map(|(config, _)| config)
    }

    /// Load configuration and collect warnings about unknown keys
    pub fn load_with_warnings(path: &Path) -> BrowserResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Roots ready for a `TreeModel`, with relative paths resolved against `base`
    pub fn build_roots(&self, base: &Path) -> Vec<ResourceRoot> {
        self.roots
            .iter()
            .enumerate()
            .map(|(index, root)| root.resolved(base).into_root(index))
            .collect()
    }

    /// Every watched directory, resolved against `base`
    pub fn watched_directories(&self, base: &Path) -> Vec<PathBuf> {
        self.roots
            .iter()
            .flat_map(|root| root.resolved(base).watched_directories)
            .collect()
    }
}
