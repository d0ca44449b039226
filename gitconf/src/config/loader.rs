//! Loading configuration files from disk.
//!
//! [`ConfigLoader`] is the public load surface. It resolves paths, consults
//! the caller's [`ConfigCache`], parses files (expanding includes) on a
//! miss, and assembles the system, global and repository tiers.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::ConfigCache;
use crate::config::document::ConfigDocument;
use crate::config::environment::ConfigLocations;
use crate::config::include::IncludeResolver;
use crate::config::merger::{ConfigSource, ScopeMerger};
use crate::config::scope::Scope;
use crate::discovery::locator::{GitDirLocator, Validation};
use crate::error::{Error, Result};
use crate::path::normalize::normalize;

/// Loads configuration files, optionally through a cache.
///
/// # Examples
///
/// ```no_run
/// use gitconf::{ConfigCache, ConfigLoader};
/// use std::path::Path;
///
/// let cache = ConfigCache::new();
/// let loader = ConfigLoader::new(&cache);
///
/// // System, global and repository values, highest precedence last.
/// let config = loader.load_with_inheritance(Path::new(".")).unwrap();
/// if let Some(name) = config.get("user.name") {
///     println!("committing as {name}");
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigLoader<'c> {
    cache: Option<&'c ConfigCache>,
    locator: GitDirLocator,
}

impl<'c> ConfigLoader<'c> {
    /// A loader that memoizes parses in `cache`.
    #[must_use]
    pub fn new(cache: &'c ConfigCache) -> Self {
        Self {
            cache: Some(cache),
            locator: GitDirLocator::new(),
        }
    }

    /// A loader that parses on every call.
    #[must_use]
    pub fn uncached() -> ConfigLoader<'static> {
        ConfigLoader {
            cache: None,
            locator: GitDirLocator::new(),
        }
    }

    /// Use a different validation level for repository discovery.
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.locator = GitDirLocator::with_validation(validation);
        self
    }

    /// The locator used when a directory is given.
    #[must_use]
    pub fn locator(&self) -> &GitDirLocator {
        &self.locator
    }

    /// Load the configuration governing `path`.
    ///
    /// - A file is parsed directly.
    /// - A directory is resolved to its repository, and the repository's
    ///   configuration file is parsed. Outside any repository the result
    ///   is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotExist`] if `path` does not exist
    /// - [`Error::CorruptMetadataDir`] if discovery hits a broken `.git`
    /// - Tokenizer, include and I/O errors while parsing
    pub fn load(&self, path: &Path) -> Result<Option<ConfigDocument>> {
        let path = normalize(path)?;
        let meta = fs::metadata(&path).map_err(|e| Self::not_exist(&path, e))?;

        if !meta.is_dir() {
            return self.read_cached(&path).map(Some);
        }

        match self.locator.find(&path) {
            Ok(dirs) => self.read_cached(&dirs.config_path()).map(Some),
            Err(Error::NotInRepo { .. }) => {
                log::debug!("{} is not inside a repository", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Load an explicitly named configuration file.
    ///
    /// # Errors
    ///
    /// - [`Error::NotExist`] if the file does not exist
    /// - [`Error::InvalidPath`] if `path` is a directory
    /// - Tokenizer, include and I/O errors while parsing
    pub fn load_file(&self, path: &Path) -> Result<ConfigDocument> {
        let path = normalize(path)?;
        let meta = fs::metadata(&path).map_err(|e| Self::not_exist(&path, e))?;
        if meta.is_dir() {
            return Err(Error::InvalidPath {
                path,
                reason: "expected a config file, found a directory".to_string(),
            });
        }
        self.read_cached(&path)
    }

    /// Load system, global and `path` configuration merged in precedence
    /// order. Missing tiers are skipped.
    ///
    /// # Errors
    ///
    /// As [`ConfigLoader::load`], plus errors loading the system or global
    /// file.
    pub fn load_with_inheritance(&self, path: &Path) -> Result<ConfigDocument> {
        Ok(ScopeMerger::merge(&self.sources_for(Some(path))?))
    }

    /// The tiers [`ConfigLoader::load_with_inheritance`] merges, lowest
    /// precedence first. `path` may be `None` for system and global only.
    ///
    /// # Errors
    ///
    /// As [`ConfigLoader::load_with_inheritance`].
    pub fn sources_for(&self, path: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::with_capacity(3);

        let system = ConfigLocations::system_config_path();
        if let Some(document) = self.load_optional(&system)? {
            sources.push(ConfigSource::new(system, Scope::SYSTEM, document));
        }

        let user = ConfigLocations::user_config_path()?;
        if let Some(document) = self.load_optional(&user)? {
            sources.push(ConfigSource::new(user, Scope::GLOBAL, document));
        }

        if let Some(path) = path {
            if let Some(document) = self.load(path)? {
                sources.push(ConfigSource {
                    path: self.own_config_path(path),
                    scope: Scope::SELF_,
                    document,
                });
            }
        }

        Ok(sources)
    }

    /// The system-wide configuration, or `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Tokenizer, include and I/O errors while parsing.
    pub fn system_config(&self) -> Result<Option<ConfigDocument>> {
        self.load_optional(&ConfigLocations::system_config_path())
    }

    /// The per-user configuration, or `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] if the home directory is unknown, and
    /// tokenizer, include and I/O errors while parsing.
    pub fn user_config(&self) -> Result<Option<ConfigDocument>> {
        self.load_optional(&ConfigLocations::user_config_path()?)
    }

    fn own_config_path(&self, path: &Path) -> Option<PathBuf> {
        let path = normalize(path).ok()?;
        if path.is_dir() {
            self.locator.find(&path).ok().map(|dirs| dirs.config_path())
        } else {
            Some(path)
        }
    }

    fn load_optional(&self, path: &Path) -> Result<Option<ConfigDocument>> {
        match self.load_file(path) {
            Ok(document) => Ok(Some(document)),
            Err(Error::NotExist { .. } | Error::InvalidPath { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn not_exist(path: &Path, err: std::io::Error) -> Error {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotExist {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(err)
        }
    }

    /// Parse `path` (absolute), serving and filling the cache.
    fn read_cached(&self, path: &Path) -> Result<ConfigDocument> {
        if let Some(document) = self.cache.and_then(|cache| cache.get(path)) {
            return Ok(document);
        }

        let meta = fs::metadata(path).map_err(|e| Self::not_exist(path, e))?;
        let bytes = fs::read(path)?;
        let document = IncludeResolver::parse_document(&bytes, path)?;

        if let Some(cache) = self.cache {
            match meta.modified() {
                Ok(mod_time) => cache.set(path, document.clone(), mod_time, meta.len()),
                Err(e) => log::warn!("not caching {}: {e}", path.display()),
            }
        }
        log::debug!("loaded config {}", path.display());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn make_repo(work: &Path, config: &str) {
        let git = work.join(".git");
        fs::create_dir_all(git.join("refs")).unwrap();
        fs::create_dir_all(git.join("objects")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(git.join("config"), config).unwrap();
    }

    fn set_mtime(path: &Path, mtime: SystemTime) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_load_nonexistent_path() {
        let loader = ConfigLoader::uncached();
        let err = loader
            .load(Path::new("/nonexistent/gitconf/config"))
            .unwrap_err();
        assert!(err.is_not_exist());
        assert!(loader
            .load_file(Path::new("/nonexistent/gitconf/config"))
            .unwrap_err()
            .is_not_exist());
    }

    #[test]
    fn test_load_file_directly() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.config");
        fs::write(&path, "[a \"b\"]\n\tc = d\n").unwrap();

        let loader = ConfigLoader::uncached();
        let doc = loader.load(&path).unwrap().unwrap();
        assert_eq!(doc.get("a.b.c"), Some("d"));
        assert_eq!(loader.load_file(&path).unwrap(), doc);
    }

    #[test]
    fn test_load_file_rejects_directory() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            ConfigLoader::uncached().load_file(temp.path()),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_load_directory_in_repo() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        make_repo(&work, "[user]\n\tname = repo\n");
        fs::create_dir_all(work.join("src")).unwrap();

        let doc = ConfigLoader::uncached()
            .load(&work.join("src"))
            .unwrap()
            .unwrap();
        assert_eq!(doc.get("user.name"), Some("repo"));
    }

    #[test]
    fn test_load_directory_outside_repo() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLoader::uncached().load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_syntax_error_propagates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.config");
        fs::write(&path, "[ok]\n\tkey = 1\n\tbad key = 2\n").unwrap();

        let err = ConfigLoader::uncached().load(&path).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_cache_is_filled_and_reused() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "[a]\n\tb = first\n").unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        set_mtime(&path, stamp);

        let cache = ConfigCache::new();
        let loader = ConfigLoader::new(&cache);
        assert_eq!(loader.load_file(&path).unwrap().get("a.b"), Some("first"));
        assert_eq!(cache.len(), 1);

        // Same length, same timestamp: served from the cache.
        fs::write(&path, "[a]\n\tb = other\n").unwrap();
        set_mtime(&path, stamp);
        assert_eq!(loader.load_file(&path).unwrap().get("a.b"), Some("first"));

        // New timestamp: re-read.
        set_mtime(&path, stamp + Duration::from_secs(1));
        assert_eq!(loader.load_file(&path).unwrap().get("a.b"), Some("other"));
    }

    #[test]
    fn test_uncached_always_reads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);

        fs::write(&path, "[a]\n\tb = first\n").unwrap();
        set_mtime(&path, stamp);
        let loader = ConfigLoader::uncached();
        assert_eq!(loader.load_file(&path).unwrap().get("a.b"), Some("first"));

        fs::write(&path, "[a]\n\tb = other\n").unwrap();
        set_mtime(&path, stamp);
        assert_eq!(loader.load_file(&path).unwrap().get("a.b"), Some("other"));
    }
}
