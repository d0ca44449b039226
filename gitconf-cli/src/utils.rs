//! Utility functions for CLI operations.
//!
//! This module resolves which configuration file a command works on and
//! provides the shared read and edit paths used by every command.

use crate::error::CliError;
use gitconf::path::normalize;
use gitconf::{ConfigDocument, ConfigLoader, ConfigLocations, Error, GitDirLocator, ScopeMerger};
use std::env;
use std::path::{Path, PathBuf};

/// Which configuration file a command reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileSelector {
    /// The repository around the current directory, with inheritance for
    /// reads.
    #[default]
    Auto,
    /// The system-wide file.
    System,
    /// The per-user file.
    Global,
    /// The repository file only.
    Local,
    /// An explicitly named file.
    File(PathBuf),
}

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose/quiet already configured the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// The file selection.
    pub file: FileSelector,

    /// Merge lower-precedence files into the selection when reading.
    pub include: bool,
}

/// Resolve a path, using CWD if not specified.
///
/// Explicit paths are normalized (made absolute, `~` expanded) but not
/// canonicalized, so symlinks are preserved.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path_to_resolve = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };
    Ok(normalize(&path_to_resolve)?)
}

/// Load the document a read command works on.
///
/// - `Auto` merges system, global and the enclosing repository (just
///   system and global outside a repository).
/// - `System` and `Global` read that file alone; a missing file reads as
///   empty. With `--include`, `Global` also merges the system file.
/// - `Local` and `File` read that file, or with `--include` merge it over
///   system and global.
pub fn read_document(global: &GlobalOptions) -> Result<ConfigDocument, CliError> {
    let loader = ConfigLoader::uncached();

    let document = match &global.file {
        FileSelector::Auto => loader.load_with_inheritance(&resolve_path(None)?)?,
        FileSelector::System => loader.system_config()?.unwrap_or_default(),
        FileSelector::Global if global.include => ScopeMerger::merge(&loader.sources_for(None)?),
        FileSelector::Global => loader.user_config()?.unwrap_or_default(),
        FileSelector::Local | FileSelector::File(_) => {
            let path = target_path(global)?;
            if global.include {
                loader.load_with_inheritance(&path)?
            } else {
                loader.load_file(&path)?
            }
        }
    };
    Ok(document)
}

/// The file a write command modifies.
///
/// `Auto` and `Local` require a repository around the current directory.
pub fn target_path(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.file {
        FileSelector::Auto | FileSelector::Local => {
            let cwd = resolve_path(None)?;
            Ok(GitDirLocator::new().find(&cwd)?.config_path())
        }
        FileSelector::System => Ok(ConfigLocations::system_config_path()),
        FileSelector::Global => Ok(ConfigLocations::user_config_path()?),
        FileSelector::File(path) => resolve_path(Some(path.clone())),
    }
}

/// Load the selected file, apply `edit` and save the result.
///
/// A missing file starts out empty and is created on save. Nothing is
/// written when `edit` reports no change.
pub fn edit_document<F>(global: &GlobalOptions, edit: F) -> Result<(), CliError>
where
    F: FnOnce(&mut ConfigDocument) -> Result<bool, CliError>,
{
    let path = target_path(global)?;
    let mut document = load_for_edit(&path)?;

    if edit(&mut document)? {
        document.save(&path)?;
        log::info!("updated {}", path.display());
    }
    Ok(())
}

fn load_for_edit(path: &Path) -> Result<ConfigDocument, CliError> {
    match ConfigLoader::uncached().load_file(path) {
        Ok(document) => Ok(document),
        Err(Error::NotExist { .. }) => {
            log::debug!("{} does not exist yet", path.display());
            Ok(ConfigDocument::new())
        }
        Err(e) => Err(e.into()),
    }
}
