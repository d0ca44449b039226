//! A discovered repository and its configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::document::ConfigDocument;
use crate::config::loader::ConfigLoader;
use crate::discovery::locator::MetadataDirs;
use crate::error::Result;
use crate::path::normalize::join_relative;

/// Snapshot of a repository: its directories, work tree and own config.
///
/// Built once by [`Repository::discover`] and read-only afterwards; reload
/// to observe changes on disk.
///
/// # Examples
///
/// ```no_run
/// use gitconf::{ConfigCache, ConfigLoader, Repository};
/// use std::path::Path;
///
/// let cache = ConfigCache::new();
/// let loader = ConfigLoader::new(&cache);
/// let repo = Repository::discover(Path::new("."), &loader).unwrap();
///
/// match repo.work_dir() {
///     Some(dir) => println!("work tree at {}", dir.display()),
///     None => println!("bare repository at {}", repo.git_dir().display()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    git_dir: PathBuf,
    common_dir: PathBuf,
    work_dir: Option<PathBuf>,
    config: ConfigDocument,
}

impl Repository {
    /// Locate the repository governing `path` and load its configuration
    /// (repository file only, includes expanded) through `loader`.
    ///
    /// # Errors
    ///
    /// Discovery errors from [`crate::GitDirLocator::find`], and load errors
    /// for the repository configuration file.
    pub fn discover(path: &Path, loader: &ConfigLoader<'_>) -> Result<Self> {
        let dirs = loader.locator().find(path)?;
        Self::open(dirs, loader)
    }

    /// Build a repository from already-located directories.
    ///
    /// # Errors
    ///
    /// Load errors for `<common_dir>/config`.
    pub fn open(dirs: MetadataDirs, loader: &ConfigLoader<'_>) -> Result<Self> {
        let config = loader.load_file(&dirs.config_path())?;
        let work_dir = Self::resolve_work_dir(&dirs.git_dir, &config)?;
        Ok(Self {
            git_dir: dirs.git_dir,
            common_dir: dirs.common_dir,
            work_dir,
            config,
        })
    }

    fn resolve_work_dir(git_dir: &Path, config: &ConfigDocument) -> Result<Option<PathBuf>> {
        if config.get_bool("core.bare", false)? {
            return Ok(None);
        }

        // Linked worktrees record the path of their `.git` file.
        if let Ok(text) = fs::read_to_string(git_dir.join("gitdir")) {
            if let Some(line) = text.lines().next().map(str::trim).filter(|l| !l.is_empty()) {
                let dot_git = join_relative(git_dir, Path::new(line))?;
                return Ok(dot_git.parent().map(Path::to_path_buf));
            }
        }

        if let Some(worktree) = config.get("core.worktree").filter(|w| !w.is_empty()) {
            return Ok(Some(join_relative(git_dir, Path::new(worktree))?));
        }

        if git_dir.file_name().is_some_and(|name| name == ".git") {
            return Ok(git_dir.parent().map(Path::to_path_buf));
        }

        Ok(None)
    }

    /// The per-checkout metadata directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// The shared metadata directory.
    #[must_use]
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    /// The work tree, or `None` for bare repositories.
    #[must_use]
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// The repository's own configuration.
    #[must_use]
    pub fn config(&self) -> &ConfigDocument {
        &self.config
    }

    /// Path of the repository configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.common_dir.join("config")
    }

    /// Whether the repository has no work tree.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.work_dir.is_none()
    }

    /// Whether this is a linked worktree of another repository.
    #[must_use]
    pub fn is_linked_worktree(&self) -> bool {
        self.git_dir != self.common_dir
    }
}
