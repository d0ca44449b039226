//! Common test utilities for integration tests.
//!
//! Repositories are built either with the `git` CLI (for layouts exactly as
//! git writes them) or by hand (for broken or unusual layouts).

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use gitconf::config::environment::{SYSTEM_CONFIG_ENV, XDG_CONFIG_HOME_ENV};

/// Whether a usable `git` binary is on `PATH`.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Runs `git` in `dir`, isolated from the invoking user's configuration.
#[allow(dead_code)]
pub fn run_git(dir: &Path, args: &[&str]) -> Result<String, String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", dir.join(".test-global-gitconfig"))
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .output()
        .map_err(|e| format!("Failed to execute git: {e}"))?;

    if !output.status.success() {
        return Err(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Creates a repository with one commit at `path`.
#[allow(dead_code)]
pub fn create_test_repo(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| e.to_string())?;
    run_git(path, &["init", "-q"])?;
    fs::write(path.join("README.md"), "Test repository\n").map_err(|e| e.to_string())?;
    run_git(path, &["add", "README.md"])?;
    run_git(path, &["commit", "-q", "-m", "Initial commit"])?;
    Ok(())
}

/// Creates a bare repository at `path`.
#[allow(dead_code)]
pub fn create_bare_repo(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| e.to_string())?;
    run_git(path, &["init", "-q", "--bare"])?;
    Ok(())
}

/// Adds a linked worktree of `repo` at `worktree` on a new branch.
#[allow(dead_code)]
pub fn create_worktree(repo: &Path, worktree: &Path, branch: &str) -> Result<(), String> {
    let target = worktree.to_str().ok_or("non UTF-8 path")?;
    run_git(repo, &["worktree", "add", "-q", "-b", branch, target])?;
    Ok(())
}

/// Lays out a minimal metadata directory by hand.
#[allow(dead_code)]
pub fn fake_metadata_dir(dir: &Path, config: &str) {
    fs::create_dir_all(dir.join("refs/heads")).unwrap();
    fs::create_dir_all(dir.join("objects/pack")).unwrap();
    fs::write(dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(dir.join("config"), config).unwrap();
}

/// Writes `contents` to `dir/name`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Canonical form for comparing paths that may pass through symlinks
/// (e.g. `/var` vs `/private/var`).
#[allow(dead_code)]
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize()
        .unwrap_or_else(|e| panic!("cannot canonicalize {}: {e}", path.display()))
}

/// Points `HOME`, `XDG_CONFIG_HOME` and the system file override into a
/// sandbox, restoring the previous values on drop. Tests using this must be
/// `#[serial]`.
#[allow(dead_code)]
pub struct ConfigSandbox {
    pub home: PathBuf,
    pub system: PathBuf,
    saved: Vec<(&'static str, Option<OsString>)>,
}

#[allow(dead_code)]
impl ConfigSandbox {
    pub fn new(root: &Path) -> Self {
        let vars = ["HOME", XDG_CONFIG_HOME_ENV, SYSTEM_CONFIG_ENV];
        let saved = vars.iter().map(|&k| (k, env::var_os(k))).collect();

        let home = root.join("home");
        fs::create_dir_all(&home).unwrap();
        let system = root.join("etc/gitconfig");

        env::set_var("HOME", &home);
        env::remove_var(XDG_CONFIG_HOME_ENV);
        env::set_var(SYSTEM_CONFIG_ENV, &system);

        Self {
            home,
            system,
            saved,
        }
    }

    pub fn write_system(&self, contents: &str) {
        fs::create_dir_all(self.system.parent().unwrap()).unwrap();
        fs::write(&self.system, contents).unwrap();
    }

    pub fn write_global(&self, contents: &str) -> PathBuf {
        write_file(&self.home, ".gitconfig", contents)
    }
}

impl Drop for ConfigSandbox {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}
