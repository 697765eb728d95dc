//! Configuration module for Arbor
//!
//! Resolution order for the browser configuration:
//! 1. `--config` CLI flag (highest priority)
//! 2. `ARBOR_CONFIG` environment variable
//! 3. `arbor.toml` in the project directory
//! 4. `BrowserConfig::for_project` defaults (lowest priority)
//!
//! Panel settings (`settings`) are separate: a `Key=Value` file written by
//! the panels themselves.

mod loader;
pub mod settings;
mod types;

pub use loader::{
    find_config_file, load_for_project, load_with_warnings, ConfigWarning, CONFIG_ENV_VAR,
    PROJECT_CONFIG_FILE,
};
pub use settings::{PanelSettings, SettingsFile};
pub use types::{BrowserConfig, RootConfig};
