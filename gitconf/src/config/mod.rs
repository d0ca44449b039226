//! The configuration model: parsing, scoping, merging and saving.
//!
//! # Precedence
//!
//! Three tiers are merged, lowest precedence first:
//!
//! 1. System file (`$GITCONF_SYSTEM_CONFIG`, default `/etc/gitconfig`)
//! 2. Per-user file (`$XDG_CONFIG_HOME/git/config` if present, else
//!    `~/.gitconfig`)
//! 3. Repository file (`<common dir>/config`) or an explicitly named file
//!
//! Within each tier, values pulled in through `include.path` come after
//! the file's own values. Lookups return the last value, so later tiers
//! and included files win; [`ConfigDocument::get_all`] lists every value,
//! lowest precedence first.
//!
//! # Examples
//!
//! ```
//! use gitconf::config::{parser, ConfigDocument};
//!
//! let entries = parser::parse(b"[remote \"origin\"]\n\turl = /srv/repo.git\n").unwrap();
//! let mut doc = ConfigDocument::from_entries(entries);
//! doc.set("remote.origin.url", "/srv/moved.git").unwrap();
//!
//! assert_eq!(doc.to_string(), "[remote \"origin\"]\n\turl = /srv/moved.git\n");
//! ```

pub mod document;
pub mod environment;
pub mod include;
pub mod loader;
pub mod merger;
pub mod parser;
pub mod scope;
mod serializer;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use document::{ConfigDocument, ConfigValue};
pub use environment::ConfigLocations;
pub use include::{IncludeResolver, MAX_INCLUDE_DEPTH};
pub use loader::ConfigLoader;
pub use merger::{ConfigSource, ScopeMerger};
pub use scope::Scope;
