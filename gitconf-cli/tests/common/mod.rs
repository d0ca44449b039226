//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - A sandbox with its own home directory and system config file
//! - Command builder helpers that run `gitconf` inside the sandbox
//! - Fixtures for repository layouts

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated configuration files.
///
/// Every command built from it sees:
/// - `HOME` pointing at a private directory (the per-user file lives there)
/// - `GITCONF_SYSTEM_CONFIG` pointing at a private system file
/// - The temp directory as its working directory
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Home directory for the per-user file
    pub home: PathBuf,
    /// System-wide config file (not created until written)
    pub system_config: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let home = temp_path.join("home");
        fs::create_dir_all(&home).expect("Failed to create home dir");
        let system_config = temp_path.join("etc").join("gitconfig");

        Self {
            temp_dir,
            temp_path,
            home,
            system_config,
        }
    }

    /// Get a command builder running in `dir` inside the sandbox.
    pub fn command_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("gitconf").expect("Failed to find gitconf binary");
        cmd.current_dir(dir)
            .env("HOME", &self.home)
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("GITCONF_LOG_MODE")
            .env_remove("GITCONF_OUTPUT_FORMAT")
            .env("GITCONF_SYSTEM_CONFIG", &self.system_config);
        cmd
    }

    /// Get a command builder running in the temp directory.
    pub fn command(&self) -> Command {
        self.command_in(&self.temp_path)
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write the system-wide config file.
    pub fn write_system(&self, contents: &str) {
        self.write_file(&self.system_config, contents);
    }

    /// Write the per-user config file (`~/.gitconfig`).
    pub fn write_global(&self, contents: &str) -> PathBuf {
        let path = self.home.join(".gitconfig");
        self.write_file(&path, contents);
        path
    }

    /// Write `contents` to `path`, creating parent directories.
    pub fn write_file(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, contents).expect("Failed to write file");
    }

    /// Create a repository work tree named `name` with the given config.
    ///
    /// The metadata directory is laid out by hand so tests do not depend on
    /// a `git` binary.
    pub fn create_repo(&self, name: &str, config: &str) -> PathBuf {
        let work = self.temp_path.join(name);
        let git = work.join(".git");
        fs::create_dir_all(git.join("refs").join("heads")).expect("Failed to create refs");
        fs::create_dir_all(git.join("objects").join("pack")).expect("Failed to create objects");
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").expect("Failed to write HEAD");
        fs::write(git.join("config"), config).expect("Failed to write config");
        work
    }

    /// Run `gitconf` with `args` in `dir` and return stdout, asserting success.
    pub fn run_ok(&self, dir: &Path, args: &[&str]) -> String {
        let output = self
            .command_in(dir)
            .args(args)
            .output()
            .expect("Failed to run gitconf");

        assert!(
            output.status.success(),
            "gitconf {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
