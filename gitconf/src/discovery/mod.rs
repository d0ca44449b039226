//! Repository discovery.
//!
//! [`GitDirLocator`] answers "which metadata directory governs this path",
//! following `.git` indirection files and worktree `commondir` pointers.
//! [`Repository`] adds the work tree and the repository's configuration.

pub mod locator;
pub mod repository;

pub use locator::{find_git_config, find_git_dir, GitDirLocator, MetadataDirs, Validation};
pub use repository::Repository;
