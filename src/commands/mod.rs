//! Command implementations for the `arbor` binary
//!
//! Every tree command opens a `Session` on a project directory, runs its
//! frames against `LocalStorage`, and prints the result as text or as one
//! NDJSON line.

mod browse;
mod edit;
mod scene;
mod watch;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use arbor::config::settings::{apply_settings, collect_settings};
use arbor::config::{load_for_project, ConfigWarning, SettingsFile};
use arbor::domain::ports::{BrowserEventSink, NoopEventSink, NullResourceCache};
use arbor::domain::value_objects::resource_path;
use arbor::infrastructure::{ConsoleEventSink, JsonEventSink};
use arbor::{BrowserConfig, EntryOperations, EntryReference, LocalStorage, ResourceBrowser};

use crate::cli::ProjectArgs;

pub use browse::{cmd_find, cmd_tree};
pub use edit::{cmd_create, cmd_delete, cmd_move, cmd_rename};
pub use scene::{cmd_scene, SceneOptions};
pub use watch::cmd_watch;

/// Flags every command honours
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub json: bool,
    pub verbose: u8,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// `--json` streams events on stdout, `-v` describes them on stderr
    pub fn event_sink(&self) -> Box<dyn BrowserEventSink> {
        if self.json {
            Box::new(JsonEventSink::stdout())
        } else if self.verbose > 0 {
            Box::new(ConsoleEventSink::stderr())
        } else {
            Box::new(NoopEventSink)
        }
    }
}

/// A resource browser over one project directory on the local disk
pub struct Session {
    pub browser: ResourceBrowser,
    pub config: BrowserConfig,
    /// Directory relative config paths resolve against
    pub base: PathBuf,
    storage: LocalStorage,
    cache: NullResourceCache,
    events: Box<dyn BrowserEventSink>,
    settings: Option<SettingsFile>,
}

impl Session {
    pub fn open(project: &ProjectArgs, options: &GlobalOptions) -> Result<Self> {
        if !project.dir.is_dir() {
            bail!("project directory not found: {}", project.dir.display());
        }
        let dir = std::fs::canonicalize(&project.dir)
            .with_context(|| format!("resolving {}", project.dir.display()))?;
        let (config, base, warnings) = load_for_project(options.config.as_deref(), &dir)?;
        print_config_warnings(&warnings);

        let settings = config
            .settings_file
            .as_ref()
            .map(|path| SettingsFile::new(base.join(path)))
            .or_else(|| SettingsFile::default_location().map(SettingsFile::new));

        let mut browser = ResourceBrowser::from_config(&config, &base);
        if let Some(file) = &settings {
            match file.load() {
                Ok(text) => {
                    apply_settings(&mut browser, &text);
                }
                Err(err) => eprintln!("⚠ Ignoring settings in {}: {}", file.path().display(), err),
            }
        }

        let mut session = Self {
            storage: LocalStorage::new().respect_ignore_files(config.respect_ignore_files),
            cache: NullResourceCache,
            events: options.event_sink(),
            browser,
            config,
            base,
            settings,
        };
        session.frame();

        if let Some(root) = project.root {
            if !session.browser.select_root(root) {
                bail!(
                    "no root {} (the configuration defines {})",
                    root,
                    session.browser.tree().roots().len()
                );
            }
        }
        Ok(session)
    }

    /// One frame: rebuild if dirty, drop stale state, open requested dialogs
    pub fn frame(&mut self) -> bool {
        let ops = EntryOperations::new(&self.storage, &self.cache, self.events.as_ref());
        self.browser.begin_frame(&ops)
    }

    /// Run `f` with the browser and the operations bound to this session
    pub fn with_ops<T>(&mut self, f: impl FnOnce(&mut ResourceBrowser, &EntryOperations<'_>) -> T) -> T {
        let ops = EntryOperations::new(&self.storage, &self.cache, self.events.as_ref());
        f(&mut self.browser, &ops)
    }

    /// Root the command works on
    pub fn root_index(&self) -> usize {
        self.browser.left().root_index
    }

    pub fn root_name(&self) -> &str {
        self.browser
            .tree()
            .root(self.root_index())
            .map(|root| root.name.as_str())
            .unwrap_or_default()
    }

    /// Resolve a user-supplied resource path in the current root
    pub fn entry(&self, path: &str) -> Result<EntryReference> {
        let reference = EntryReference::new(self.root_index(), resource_path::normalize(path));
        if self.browser.tree().resolve(&reference).is_none() {
            bail!("no entry '{}' in root '{}'", path, self.root_name());
        }
        Ok(reference)
    }

    /// Persist panel settings; failures are reported but never fatal
    pub fn save_settings(&self) {
        let Some(file) = &self.settings else {
            return;
        };
        if let Err(err) = file.save(&collect_settings(&[&self.browser])) {
            eprintln!("⚠ Could not save settings to {}: {}", file.path().display(), err);
        }
    }
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, w.file.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }
    }
}

/// Final NDJSON line of a command
pub fn emit_complete(command: &str, data: serde_json::Value) -> Result<()> {
    let line = serde_json::json!({
        "event": "complete",
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}
