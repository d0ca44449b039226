//! Combining per-tier documents into one precedence-ordered view.
//!
//! Merging appends, it never overwrites: every value of every tier is kept,
//! re-tagged with its tier's scope, and lookups pick the last one. The order
//! in which sources are merged is therefore the precedence order, and
//! callers pass them lowest first (system, global, then the repository).

use std::path::PathBuf;

use crate::config::document::ConfigDocument;
use crate::config::scope::Scope;

/// One loaded tier.
///
/// # Examples
///
/// ```
/// use gitconf::config::ConfigSource;
/// use gitconf::{ConfigDocument, Scope};
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: Some(PathBuf::from("/etc/gitconfig")),
///     scope: Scope::SYSTEM,
///     document: ConfigDocument::new(),
/// };
/// assert_eq!(source.scope.to_string(), "system");
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// File the document was read from, if any.
    pub path: Option<PathBuf>,
    /// Tier the document's values are tagged with when merged.
    pub scope: Scope,
    /// Parsed contents.
    pub document: ConfigDocument,
}

impl ConfigSource {
    /// A source read from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, scope: Scope, document: ConfigDocument) -> Self {
        Self {
            path: Some(path.into()),
            scope,
            document,
        }
    }
}

/// Merges tiers in the order given.
///
/// # Examples
///
/// ```
/// use gitconf::config::ScopeMerger;
/// use gitconf::ConfigDocument;
///
/// let mut system = ConfigDocument::new();
/// system.add("core.editor", "vi").unwrap();
/// let mut global = ConfigDocument::new();
/// global.add("core.editor", "nano").unwrap();
///
/// let merged = ScopeMerger::merge_tiers(Some(&system), Some(&global), None);
/// assert_eq!(merged.get("core.editor"), Some("nano"));
/// assert_eq!(merged.get_all("core.editor"), Some(vec!["vi", "nano"]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeMerger;

impl ScopeMerger {
    /// Merge sources, lowest precedence first. Sources are not reordered.
    #[must_use]
    pub fn merge(sources: &[ConfigSource]) -> ConfigDocument {
        let mut result = ConfigDocument::new();
        for source in sources {
            log::debug!(
                "merging {} config{}",
                source.scope,
                source
                    .path
                    .as_ref()
                    .map(|p| format!(" from {}", p.display()))
                    .unwrap_or_default()
            );
            result.merge(&source.document, source.scope);
        }
        result
    }

    /// Merge the three standard tiers; absent tiers are skipped.
    #[must_use]
    pub fn merge_tiers(
        system: Option<&ConfigDocument>,
        global: Option<&ConfigDocument>,
        local: Option<&ConfigDocument>,
    ) -> ConfigDocument {
        let mut result = ConfigDocument::new();
        for (document, scope) in [
            (system, Scope::SYSTEM),
            (global, Scope::GLOBAL),
            (local, Scope::SELF_),
        ] {
            if let Some(document) = document {
                result.merge(document, scope);
            }
        }
        result
    }
}
