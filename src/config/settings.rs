//! Panel settings persistence
//!
//! Settings are plain `Key=Value` lines. Each panel writes its own keys and
//! picks its keys out of the lines it is fed; unknown lines are ignored, so
//! several panels can share one file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::BrowserResult;

/// Panel state that survives restarts
pub trait PanelSettings {
    fn write_settings(&self, out: &mut String);

    /// Apply one line; returns whether the line was recognised
    fn read_setting_line(&mut self, line: &str) -> bool;
}

pub fn write_int(out: &mut String, key: &str, value: i64) {
    out.push_str(key);
    out.push('=');
    out.push_str(&value.to_string());
    out.push('\n');
}

pub fn write_str(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    out.push_str(value);
    out.push('\n');
}

pub fn read_str<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim_end_matches(['\r', '\n'])
        .strip_prefix(key)?
        .strip_prefix('=')
}

pub fn read_int(line: &str, key: &str) -> Option<i64> {
    read_str(line, key)?.trim().parse().ok()
}

/// Feed every line of `text` to `panel`; returns the number recognised
pub fn apply_settings(panel: &mut dyn PanelSettings, text: &str) -> usize {
    text.lines()
        .filter(|line| panel.read_setting_line(line))
        .count()
}

/// Settings text of several panels, in order
pub fn collect_settings(panels: &[&dyn PanelSettings]) -> String {
    let mut out = String::new();
    for panel in panels {
        panel.write_settings(&mut out);
    }
    out
}

/// The file holding panel settings
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/arbor/panels.ini`
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arbor").join("panels.ini"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored text; a missing file reads as empty
    pub fn load(&self) -> BrowserResult<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the stored text atomically
    pub fn save(&self, text: &str) -> BrowserResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let mut file = tempfile::NamedTempFile::new_in(parent)?;
        file.write_all(text.as_bytes())?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
