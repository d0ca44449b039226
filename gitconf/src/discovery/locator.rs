//! Finding the metadata directory that governs a path.
//!
//! The search starts at a path and walks towards the filesystem root. At
//! each level the directory itself may be a metadata directory (a bare
//! repository, or a path inside `.git`), or it may contain a `.git` entry:
//! either the metadata directory itself or an indirection file of the form
//! `gitdir: <path>` (linked worktrees and submodules).
//!
//! A linked worktree's metadata directory holds only per-worktree state; a
//! `commondir` file names the shared directory holding `config`, `refs` and
//! `objects`. Validation follows that pointer before checking the layout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::{join_relative, normalize, resolve_components};

const INDIRECTION_PREFIX: &str = "gitdir:";

/// How strictly a candidate directory is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// `HEAD` in the candidate; `config`, `refs/` and `objects/` in its
    /// common directory.
    #[default]
    Standard,
    /// As [`Validation::Standard`], and `objects/pack/` must exist too.
    Strict,
}

/// The directories a successful search resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDirs {
    /// The per-checkout metadata directory (holds `HEAD`).
    pub git_dir: PathBuf,
    /// The shared metadata directory (holds `config`, `refs`, `objects`).
    /// Equal to `git_dir` except in linked worktrees.
    pub common_dir: PathBuf,
}

impl MetadataDirs {
    /// Path of the repository configuration file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.common_dir.join("config")
    }

    /// Whether `git_dir` belongs to a linked worktree.
    #[must_use]
    pub fn is_linked_worktree(&self) -> bool {
        self.git_dir != self.common_dir
    }
}

/// Walks up from a start path to the governing metadata directory.
///
/// # Examples
///
/// ```no_run
/// use gitconf::GitDirLocator;
/// use std::path::Path;
///
/// let dirs = GitDirLocator::new().find(Path::new("src")).unwrap();
/// println!("git dir: {}", dirs.git_dir.display());
/// println!("config: {}", dirs.config_path().display());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GitDirLocator {
    validation: Validation,
}

impl GitDirLocator {
    /// A locator using [`Validation::Standard`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A locator using the given validation level.
    #[must_use]
    pub fn with_validation(validation: Validation) -> Self {
        Self { validation }
    }

    /// The validation level in use.
    #[must_use]
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Search upwards from `start` (which need not exist).
    ///
    /// # Errors
    ///
    /// - [`Error::NotInRepo`] if the root is reached without a match
    /// - [`Error::CorruptMetadataDir`] if a `.git` entry is found but is
    ///   unusable; the search does not continue past it
    /// - [`Error::InvalidPath`] if `start` cannot be made absolute
    pub fn find(&self, start: &Path) -> Result<MetadataDirs> {
        let start = normalize(start)?;
        let mut current = start.clone();

        loop {
            if let Some(common_dir) = self.common_dir_of(&current) {
                log::debug!("{} is a metadata dir", current.display());
                return Ok(MetadataDirs {
                    git_dir: current,
                    common_dir,
                });
            }

            let dot_git = current.join(".git");
            if let Ok(meta) = fs::metadata(&dot_git) {
                let dirs = if meta.is_dir() {
                    self.checked(dot_git.clone(), &dot_git, "not a valid git dir")?
                } else {
                    self.follow_indirection(&dot_git)?
                };
                log::debug!(
                    "found git dir {} for {}",
                    dirs.git_dir.display(),
                    start.display()
                );
                return Ok(dirs);
            }

            if !current.pop() {
                return Err(Error::NotInRepo { path: start });
            }
        }
    }

    /// Whether `dir` is a metadata directory under this locator's rules.
    #[must_use]
    pub fn is_metadata_dir(&self, dir: &Path) -> bool {
        self.common_dir_of(dir).is_some()
    }

    fn checked(&self, candidate: PathBuf, entry: &Path, reason: &str) -> Result<MetadataDirs> {
        match self.common_dir_of(&candidate) {
            Some(common_dir) => Ok(MetadataDirs {
                git_dir: candidate,
                common_dir,
            }),
            None => Err(Error::CorruptMetadataDir {
                path: entry.to_path_buf(),
                reason: reason.to_string(),
            }),
        }
    }

    fn follow_indirection(&self, dot_git: &Path) -> Result<MetadataDirs> {
        let corrupt = |reason: String| Error::CorruptMetadataDir {
            path: dot_git.to_path_buf(),
            reason,
        };

        let text = fs::read_to_string(dot_git).map_err(|e| match e.kind() {
            ErrorKind::InvalidData => corrupt(format!("cannot read gitdir file: {e}")),
            _ => Error::Io(e),
        })?;
        let first = text.lines().next().unwrap_or_default();
        let Some(target) = first.strip_prefix(INDIRECTION_PREFIX) else {
            return Err(corrupt("bad gitdir file".to_string()));
        };
        let target = target.trim();
        if target.is_empty() {
            return Err(corrupt("bad gitdir file".to_string()));
        }

        let base = dot_git.parent().unwrap_or_else(|| Path::new("/"));
        let target = join_relative(base, Path::new(target))?;
        let reason = format!("points to corrupt git repo: {}", target.display());
        self.checked(target, dot_git, &reason)
    }

    /// Returns the common directory if `dir` passes validation.
    fn common_dir_of(&self, dir: &Path) -> Option<PathBuf> {
        if !dir.join("HEAD").is_file() {
            return None;
        }

        let common_dir = read_first_line(&dir.join("commondir"))
            .filter(|line| !line.is_empty())
            .map_or_else(
                || dir.to_path_buf(),
                |line| resolve_components(&dir.join(line)),
            );

        let layout_ok = common_dir.join("config").is_file()
            && common_dir.join("refs").is_dir()
            && common_dir.join("objects").is_dir();
        if !layout_ok {
            return None;
        }
        if self.validation == Validation::Strict && !common_dir.join("objects/pack").is_dir() {
            return None;
        }
        Some(common_dir)
    }
}

fn read_first_line(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    text.lines().next().map(|line| line.trim_end().to_string())
}

/// Find the metadata directory for `start` with standard validation.
///
/// # Errors
///
/// See [`GitDirLocator::find`].
pub fn find_git_dir(start: &Path) -> Result<PathBuf> {
    GitDirLocator::new().find(start).map(|dirs| dirs.git_dir)
}

/// Find the repository configuration file for `start`.
///
/// For linked worktrees this is the shared file in the common directory.
///
/// # Errors
///
/// See [`GitDirLocator::find`].
pub fn find_git_config(start: &Path) -> Result<PathBuf> {
    GitDirLocator::new()
        .find(start)
        .map(|dirs| dirs.config_path())
}
