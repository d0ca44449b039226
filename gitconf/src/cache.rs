//! Parse cache for configuration files.
//!
//! Parsing (with include expansion) is cheap but not free, and the same
//! system and per-user files are read for every repository a process looks
//! at. [`ConfigCache`] remembers each parsed root file together with the
//! file metadata observed when it was read, and re-validates that metadata
//! on every lookup.
//!
//! Only the root file's metadata is tracked. Edits to an included file are
//! not noticed until the root file changes or the entry is invalidated.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use crate::config::document::ConfigDocument;

/// Which file metadata must be unchanged for a cached entry to be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalenessPolicy {
    /// Compare modification time only. A rewrite within the filesystem's
    /// timestamp granularity can go unnoticed.
    #[default]
    ModTime,
    /// Compare modification time and file size.
    ModTimeAndSize,
}

/// One cached document and the metadata it was parsed from.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    document: ConfigDocument,
    source_path: PathBuf,
    mod_time: SystemTime,
    size: Option<u64>,
}

impl CacheEntry {
    /// The cached document.
    #[must_use]
    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// The file the document was parsed from.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Modification time observed at parse time.
    #[must_use]
    pub fn mod_time(&self) -> SystemTime {
        self.mod_time
    }

    /// File size observed at parse time, when the policy tracks it.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    fn is_current(&self) -> bool {
        let Ok(meta) = fs::metadata(&self.source_path) else {
            return false;
        };
        let Ok(mod_time) = meta.modified() else {
            return false;
        };
        mod_time == self.mod_time && self.size.map_or(true, |size| size == meta.len())
    }
}

/// Thread-safe map from absolute file path to parsed document.
///
/// Owned by the caller and shared by reference; there is no process-wide
/// instance. Concurrent loads of the same file may both parse it, in which
/// case the last store wins.
///
/// # Examples
///
/// ```
/// use gitconf::{ConfigCache, ConfigDocument};
/// use std::time::SystemTime;
///
/// let cache = ConfigCache::new();
/// cache.set("/nonexistent/config", ConfigDocument::new(), SystemTime::now(), 0);
/// assert_eq!(cache.len(), 1);
///
/// // The file cannot be stat'ed, so the entry is stale and gets evicted.
/// assert!(cache.get("/nonexistent/config").is_none());
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: RwLock<HashMap<PathBuf, CacheEntry>>,
    policy: StalenessPolicy,
}

impl ConfigCache {
    /// Create an empty cache with the default [`StalenessPolicy::ModTime`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache with an explicit staleness policy.
    #[must_use]
    pub fn with_policy(policy: StalenessPolicy) -> Self {
        Self {
            entries: RwLock::default(),
            policy,
        }
    }

    /// The policy used to validate entries.
    #[must_use]
    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    // Entries are idempotent parse results, so a panic while a guard was
    // held cannot leave them half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<PathBuf, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<PathBuf, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached document for `path` if the file is unchanged.
    ///
    /// A stale entry, or one whose file can no longer be stat'ed, is evicted
    /// and reported as a miss.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<ConfigDocument> {
        let path = path.as_ref();
        let entry = self.read().get(path).cloned()?;
        if entry.is_current() {
            log::debug!("config cache hit: {}", path.display());
            return Some(entry.document);
        }
        log::debug!("config cache stale: {}", path.display());
        self.evict_if_unchanged(path, &entry);
        None
    }

    // Another thread may have stored a fresh entry since `stale` was read.
    fn evict_if_unchanged(&self, path: &Path, stale: &CacheEntry) -> bool {
        let mut entries = self.write();
        let unchanged = entries
            .get(path)
            .is_some_and(|e| e.mod_time == stale.mod_time && e.size == stale.size);
        if unchanged {
            entries.remove(path);
        }
        unchanged
    }

    /// Store `document` for `path`, replacing any existing entry.
    pub fn set(
        &self,
        path: impl Into<PathBuf>,
        document: ConfigDocument,
        mod_time: SystemTime,
        size: u64,
    ) {
        let path = path.into();
        let size = match self.policy {
            StalenessPolicy::ModTime => None,
            StalenessPolicy::ModTimeAndSize => Some(size),
        };
        let entry = CacheEntry {
            document,
            source_path: path.clone(),
            mod_time,
            size,
        };
        self.write().insert(path, entry);
    }

    /// Drop the entry for `path`. Returns whether one existed.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.write().remove(path.as_ref()).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of stored entries, stale or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A snapshot of the entry for `path` without re-validating it.
    #[must_use]
    pub fn peek(&self, path: impl AsRef<Path>) -> Option<CacheEntry> {
        self.read().get(path.as_ref()).cloned()
    }
}
