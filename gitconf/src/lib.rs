#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # gitconf
//!
//! A library for reading, merging and writing git-style configuration.
//!
//! It resolves which repository governs a path (including linked
//! worktrees), loads the system, per-user and repository files with their
//! include directives, and merges them into a single view where every
//! value remembers the tier it came from. Documents can be edited and
//! saved back atomically.
//!
//! ## Core Types
//!
//! - [`ConfigDocument`] and [`Scope`]: scoped key/value store
//! - [`ConfigLoader`] and [`ConfigCache`]: loading with memoization
//! - [`GitDirLocator`] and [`Repository`]: repository discovery
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use gitconf::{ConfigDocument, Scope};
//!
//! let mut system = ConfigDocument::new();
//! system.add("core.autocrlf", "input").unwrap();
//!
//! let mut local = ConfigDocument::new();
//! local.add("core.autocrlf", "false").unwrap();
//!
//! let mut merged = ConfigDocument::new();
//! merged.merge(&system, Scope::SYSTEM).merge(&local, Scope::SELF_);
//!
//! assert!(!merged.get_bool("core.autocrlf", true).unwrap());
//! assert_eq!(merged.get_all("core.autocrlf"), Some(vec!["input", "false"]));
//! ```

pub mod cache;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod path;

// Re-export key types at crate root for convenience
pub use cache::{CacheEntry, ConfigCache, StalenessPolicy};
pub use config::{
    ConfigDocument, ConfigLoader, ConfigLocations, ConfigValue, IncludeResolver, Scope,
    ScopeMerger,
};
pub use discovery::{
    find_git_config, find_git_dir, GitDirLocator, MetadataDirs, Repository, Validation,
};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
