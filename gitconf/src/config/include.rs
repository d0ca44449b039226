//! Expansion of `include.path` directives.
//!
//! Each file may pull in one other file: the effective (last) value of its
//! own `include.path`. The included file's values are merged after the
//! including file's with [`Scope::INCLUDE`], so they win lookups. The chain
//! is followed until a file has no directive, or until it is
//! [`MAX_INCLUDE_DEPTH`] levels deep, which is also how cycles terminate.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::document::ConfigDocument;
use crate::config::parser;
use crate::config::scope::Scope;
use crate::error::{Error, Result};
use crate::path::normalize::join_relative;

/// Nesting level at which include expansion gives up.
pub const MAX_INCLUDE_DEPTH: usize = 10;

/// Name of the directive variable.
pub const INCLUDE_KEY: &str = "include.path";

/// Parses a root file and everything it includes into one document.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeResolver;

impl IncludeResolver {
    /// Parse `bytes`, which were read from `filename`, and expand includes.
    ///
    /// Relative include targets are resolved against the directory of the
    /// file containing the directive; a leading `~` is expanded.
    ///
    /// # Errors
    ///
    /// - Tokenizer errors from any file in the chain
    /// - [`Error::IncludeDepthExceeded`] for chains of
    ///   [`MAX_INCLUDE_DEPTH`] or more includes, including cycles
    /// - [`Error::Io`] if an included file cannot be read
    pub fn parse_document(bytes: &[u8], filename: &Path) -> Result<ConfigDocument> {
        let mut document = ConfigDocument::from_entries(parser::parse(bytes)?);
        let mut next = Self::directive(&document);
        let mut origin = filename.to_path_buf();
        let mut depth = 0;

        while let Some(include) = next.take() {
            let target = Self::resolve_target(&origin, &include)?;
            depth += 1;
            if depth >= MAX_INCLUDE_DEPTH {
                return Err(Error::IncludeDepthExceeded {
                    path: target,
                    origin,
                });
            }

            log::debug!(
                "including {} from {} (depth {depth})",
                target.display(),
                origin.display()
            );
            let bytes = fs::read(&target)?;
            let included = ConfigDocument::from_entries(parser::parse(&bytes)?);
            next = Self::directive(&included);
            document.merge(&included, Scope::INCLUDE);
            origin = target;
        }

        Ok(document)
    }

    /// Read `path` and expand its includes.
    ///
    /// # Errors
    ///
    /// Same as [`IncludeResolver::parse_document`], plus [`Error::Io`] if
    /// `path` itself cannot be read.
    pub fn load(path: &Path) -> Result<ConfigDocument> {
        let bytes = fs::read(path)?;
        Self::parse_document(&bytes, path)
    }

    fn directive(document: &ConfigDocument) -> Option<String> {
        document
            .get(INCLUDE_KEY)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
    }

    fn resolve_target(origin: &Path, include: &str) -> Result<PathBuf> {
        let base = origin.parent().unwrap_or_else(|| Path::new(""));
        join_relative(base, Path::new(include))
    }
}
