//! Path helpers shared by the loader and repository discovery.
//!
//! All normalization is lexical: `~` expansion, absolutization against a
//! base directory, and `.`/`..` resolution. Symlinks are never followed, so
//! a path names the same cache entry however the filesystem is laid out
//! underneath it.

pub mod normalize;

pub use normalize::{expand_tilde, join_relative, normalize, resolve_components};
