//! Stderr logging for gitconf.
//!
//! The library itself only emits records through the `log` facade (cache
//! hits, include expansion, discovery results). [`Logger`] is the sink the
//! `gitconf` binary installs for them, and can also be used directly.

use std::env;
use std::fmt;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable selecting the default log level.
pub const LOG_MODE_ENV: &str = "GITCONF_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use gitconf::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Nothing but the command's own output.
    Quiet,
    /// Errors and warnings.
    #[default]
    Normal,
    /// Everything, including debug records from the library.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

impl LogLevel {
    /// Parses a log level name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error message if the name is not `quiet`, `normal` or
    /// `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitconf::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("chatty").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Debug,
        }
    }
}

/// A stderr logger filtered by [`LogLevel`].
///
/// # Examples
///
/// ```
/// use gitconf::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("shown");
/// logger.debug("not shown at Normal");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger with the given level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Make this logger the `log` facade's sink for the whole process.
    ///
    /// # Errors
    ///
    /// Fails if another logger was installed first.
    pub fn install(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.level.filter());
        Ok(())
    }

    fn emit(&self, level: log::Level, message: &dyn fmt::Display) {
        if level <= self.level.filter() {
            let tag = match level {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN",
                log::Level::Info => "INFO",
                log::Level::Debug | log::Level::Trace => "DEBUG",
            };
            eprintln!("{tag}: {message}");
        }
    }

    /// Logs an error message (hidden when quiet).
    pub fn error(&self, message: &str) {
        self.emit(log::Level::Error, &message);
    }

    /// Logs a warning message (hidden when quiet).
    pub fn warn(&self, message: &str) {
        self.emit(log::Level::Warn, &message);
    }

    /// Logs an informational message (verbose only).
    pub fn info(&self, message: &str) {
        self.emit(log::Level::Info, &message);
    }

    /// Logs a debug message (verbose only).
    pub fn debug(&self, message: &str) {
        self.emit(log::Level::Debug, &message);
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.emit(record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Chooses a logger from CLI flags and [`LOG_MODE_ENV`].
///
/// Priority: `verbose`, then `quiet`, then the environment variable, then
/// [`LogLevel::Normal`]. Unrecognized environment values are ignored.
///
/// # Examples
///
/// ```
/// use gitconf::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_ENV)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_log_mode<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let saved = env::var(LOG_MODE_ENV).ok();
        match value {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
        let result = f();
        match saved {
            Some(v) => env::set_var(LOG_MODE_ENV, v),
            None => env::remove_var(LOG_MODE_ENV),
        }
        result
    }

    #[test]
    fn test_log_level_display_and_parse() {
        for level in [LogLevel::Quiet, LogLevel::Normal, LogLevel::Verbose] {
            assert_eq!(LogLevel::parse(&level.to_string()).unwrap(), level);
        }
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(LogLevel::Quiet.filter(), LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_enabled_follows_level() {
        let normal = Logger::new(LogLevel::Normal);
        let warn = Metadata::builder().level(log::Level::Warn).build();
        let debug = Metadata::builder().level(log::Level::Debug).build();
        assert!(normal.enabled(&warn));
        assert!(!normal.enabled(&debug));
        assert!(Logger::new(LogLevel::Verbose).enabled(&debug));
        assert!(!Logger::new(LogLevel::Quiet).enabled(&warn));
    }

    #[test]
    #[serial]
    fn test_init_logger_defaults() {
        let logger = with_log_mode(None, || init_logger(false, false));
        assert_eq!(logger.level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        assert_eq!(
            with_log_mode(Some("verbose"), || init_logger(false, false)).level(),
            LogLevel::Verbose
        );
        assert_eq!(
            with_log_mode(Some("quiet"), || init_logger(false, false)).level(),
            LogLevel::Quiet
        );
        assert_eq!(
            with_log_mode(Some("invalid"), || init_logger(false, false)).level(),
            LogLevel::Normal
        );
    }

    #[test]
    #[serial]
    fn test_cli_flags_override_env() {
        let logger = with_log_mode(Some("quiet"), || init_logger(true, false));
        assert_eq!(logger.level(), LogLevel::Verbose);
        let logger = with_log_mode(Some("verbose"), || init_logger(false, true));
        assert_eq!(logger.level(), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_install_sets_global_logger_once() {
        Logger::new(LogLevel::Verbose).install().unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(Logger::new(LogLevel::Quiet).install().is_err());
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
