//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BrowserError, BrowserResult};

use super::types::BrowserConfig;

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "ARBOR_CONFIG";

/// Configuration file looked up in a project directory
pub const PROJECT_CONFIG_FILE: &str = "arbor.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> BrowserResult<(BrowserConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: BrowserConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BrowserError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Which configuration file applies to `project_dir`, if any.
///
/// An explicit path wins, then `ARBOR_CONFIG`, then `arbor.toml` in the
/// project directory.
pub fn find_config_file(explicit: Option<&Path>, project_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    let project_config = project_dir.join(PROJECT_CONFIG_FILE);
    project_config.is_file().then_some(project_config)
}

/// Configuration for `project_dir` plus the directory relative paths resolve against.
///
/// A file without `[[roots]]` gets the default project layout.
pub fn load_for_project(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> BrowserResult<(BrowserConfig, PathBuf, Vec<ConfigWarning>)> {
    match find_config_file(explicit, project_dir) {
        Some(path) => {
            let (mut config, warnings) = load_with_warnings(&path)?;
            if config.roots.is_empty() {
                config.roots = BrowserConfig::for_project(project_dir).roots;
            }
            let base = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project_dir.to_path_buf());
            Ok((config, base, warnings))
        }
        None => Ok((
            BrowserConfig::for_project(project_dir),
            project_dir.to_path_buf(),
            Vec::new(),
        )),
    }
}

fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with(key)
                && trimmed[key.len()..].trim_start().starts_with('=')
        })
        .map(|index| index + 1)
}
