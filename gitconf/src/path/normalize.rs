//! Lexical path normalization.
//!
//! Config files and `.git` indirection files name other files by paths that
//! may be relative, start with `~`, or contain `.`/`..`. These helpers turn
//! such paths into absolute ones without touching the filesystem, so that
//! the results are stable cache keys and predictable discovery start points.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` or `~/` to the home directory.
///
/// Other paths, including `~user/...`, are returned unchanged; `~user` is
/// not a home-directory reference here and is treated as a relative name.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path needs expansion but the home
/// directory cannot be determined.
///
/// # Examples
///
/// ```
/// use gitconf::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// assert_eq!(expand_tilde(Path::new("/absolute")).unwrap(), Path::new("/absolute"));
/// assert_eq!(expand_tilde(Path::new("~other")).unwrap(), Path::new("~other"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "cannot determine home directory".to_string(),
            })?;
            let rest = components.as_path();
            if rest.as_os_str().is_empty() {
                Ok(home)
            } else {
                Ok(home.join(rest))
            }
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// Resolve `.` and `..` components lexically.
///
/// `..` at the root stays at the root, matching how the OS resolves
/// `/../etc`. Relative inputs keep any leading `..` they cannot cancel.
///
/// # Examples
///
/// ```
/// use gitconf::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../../c")), PathBuf::from("/c"));
/// assert_eq!(resolve_components(Path::new("../x/./y")), PathBuf::from("../x/y"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                result.push(component.as_os_str());
            }
            Component::Normal(c) => {
                result.push(c);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    result.pop();
                    depth -= 1;
                } else if !result.has_root() {
                    result.push("..");
                }
            }
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

/// Make `path` absolute: expand `~`, join onto the current directory when
/// relative, and resolve `.`/`..`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `~` cannot be expanded or the current
/// directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use gitconf::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./src")).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("cannot get current directory: {e}"),
    })?;
    join_relative(&cwd, path)
}

/// Resolve `path` against `base` the way include and `gitdir:` targets are
/// resolved: `~` is expanded, absolute paths win, relative paths are taken
/// relative to `base`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `~` cannot be expanded.
///
/// # Examples
///
/// ```
/// use gitconf::path::normalize::join_relative;
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/repo/.git");
/// assert_eq!(
///     join_relative(base, Path::new("../shared.config")).unwrap(),
///     PathBuf::from("/repo/shared.config")
/// );
/// assert_eq!(
///     join_relative(base, Path::new("/etc/other")).unwrap(),
///     PathBuf::from("/etc/other")
/// );
/// ```
pub fn join_relative(base: &Path, path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    Ok(resolve_components(&joined))
}
