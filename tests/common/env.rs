//! Test environment for running the `arbor` binary against a real directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running an `arbor` command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// A temporary project directory with isolated panel settings.
///
/// Runs pass `--config` pointing at a file outside the project that only
/// redirects the settings file, so the project tree holds nothing but what a
/// test writes and the user's real settings are never touched.
pub struct TestProject {
    pub dir: TempDir,
    pub config_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp project");
        let config_dir = tempfile::tempdir().expect("create temp config dir");
        fs::write(
            config_dir.path().join("arbor.toml"),
            "settings_file = \"panels.ini\"\n",
        )
        .expect("write arbor.toml");
        Self { dir, config_dir }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.path().join("panels.ini")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, contents: &str) -> &Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write file");
        self
    }

    pub fn mkdir(&self, relative: &str) -> &Self {
        fs::create_dir_all(self.join(relative)).expect("create dir");
        self
    }

    /// Run `arbor <command> <project dir> <args...>`
    pub fn run(&self, command: &str, args: &[&str]) -> TestResult {
        let dir = self.path().to_string_lossy().into_owned();
        let mut full = vec![command, dir.as_str()];
        full.extend_from_slice(args);
        self.run_raw(&full)
    }

    /// Run `arbor <args...>` with this project's configuration
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_arbor"))
            .env_remove("ARBOR_CONFIG")
            .arg("--config")
            .arg(self.config_dir.path().join("arbor.toml"))
            .args(args)
            .output()
            .expect("run arbor");
        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
