//! Locations of the system-wide and per-user configuration files.
//!
//! Both are derived from the environment on every call, so tests (and
//! long-running callers) see changes to `HOME`, `XDG_CONFIG_HOME` or
//! [`SYSTEM_CONFIG_ENV`] immediately.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Overrides the system-wide configuration file.
pub const SYSTEM_CONFIG_ENV: &str = "GITCONF_SYSTEM_CONFIG";

/// Base directory for XDG-style per-user configuration.
pub const XDG_CONFIG_HOME_ENV: &str = "XDG_CONFIG_HOME";

/// System-wide file used when [`SYSTEM_CONFIG_ENV`] is unset or empty.
pub const DEFAULT_SYSTEM_CONFIG: &str = "/etc/gitconfig";

/// Resolves configuration file paths from the environment.
///
/// # Examples
///
/// ```no_run
/// use gitconf::ConfigLocations;
///
/// let system = ConfigLocations::system_config_path();
/// let user = ConfigLocations::user_config_path().unwrap();
/// println!("system: {}, user: {}", system.display(), user.display());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLocations;

impl ConfigLocations {
    /// The system-wide file: `$GITCONF_SYSTEM_CONFIG`, else
    /// [`DEFAULT_SYSTEM_CONFIG`].
    #[must_use]
    pub fn system_config_path() -> PathBuf {
        match env::var_os(SYSTEM_CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_SYSTEM_CONFIG),
        }
    }

    /// The XDG candidate: `$XDG_CONFIG_HOME/git/config`, else
    /// `~/.config/git/config`. The file may not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the home directory is needed but
    /// cannot be determined.
    pub fn xdg_config_path() -> Result<PathBuf> {
        match env::var_os(XDG_CONFIG_HOME_ENV) {
            Some(base) if !base.is_empty() => Ok(PathBuf::from(base).join("git").join("config")),
            _ => Ok(Self::home()?.join(".config").join("git").join("config")),
        }
    }

    /// The per-user file: the XDG candidate if it exists, otherwise
    /// `~/.gitconfig`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the home directory cannot be
    /// determined.
    pub fn user_config_path() -> Result<PathBuf> {
        let xdg = Self::xdg_config_path()?;
        if xdg.exists() {
            return Ok(xdg);
        }
        Ok(Self::home()?.join(".gitconfig"))
    }

    fn home() -> Result<PathBuf> {
        home::home_dir().ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "cannot determine home directory".to_string(),
        })
    }
}
