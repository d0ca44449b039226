//! Error types for the gitconf library.
//!
//! This module provides the error hierarchy for every operation in the
//! gitconf library, using `thiserror` for ergonomic error handling. Each
//! failure mode is its own variant so callers can match on the kind instead
//! of inspecting message text.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a gitconf error.
///
/// # Examples
///
/// ```
/// use gitconf::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(10)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the gitconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// An explicitly named configuration file or directory does not exist.
    #[error("config file or dir does not exist: {}", path.display())]
    NotExist {
        /// The path that was requested.
        path: PathBuf,
    },

    /// Repository discovery reached the filesystem root without a match.
    #[error("not in a git dir: {}", path.display())]
    NotInRepo {
        /// The path the search started from.
        path: PathBuf,
    },

    /// A variable name contained a character that is not allowed.
    #[error("invalid key character at line {line}")]
    InvalidKeyCharacter {
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A section header had a subsection that did not start with a quote.
    #[error("missing start quote at line {line}")]
    MissingStartQuote {
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// Any other syntax error reported by the tokenizer.
    #[error("syntax error at line {line}: {reason}")]
    Syntax {
        /// 1-based line number of the offending line.
        line: usize,
        /// What the tokenizer did not accept.
        reason: String,
    },

    /// A value could not be interpreted as a boolean.
    #[error("not a bool value: {key} = {value}")]
    NotBooleanValue {
        /// The variable that was read.
        key: String,
        /// The effective value of the variable.
        value: String,
    },

    /// A value could not be interpreted as an integer.
    #[error("not an integer value: {key} = {value}: {source}")]
    InvalidInteger {
        /// The variable that was read.
        key: String,
        /// The effective value of the variable.
        value: String,
        /// The underlying parse failure (format or overflow).
        #[source]
        source: ParseIntError,
    },

    /// Include directives nested too deeply, usually because of a cycle.
    #[error(
        "exceeded maximum include depth ({}) while including {} from {}; this might be due to circular includes",
        crate::config::include::MAX_INCLUDE_DEPTH,
        path.display(),
        origin.display()
    )]
    IncludeDepthExceeded {
        /// The file whose inclusion was refused.
        path: PathBuf,
        /// The file that contained the refused include directive.
        origin: PathBuf,
    },

    /// A `.git` entry exists but does not lead to a valid metadata directory.
    #[error("corrupt git dir {}: {reason}", path.display())]
    CorruptMetadataDir {
        /// The `.git` entry (or the directory it points to).
        path: PathBuf,
        /// Why the entry was rejected.
        reason: String,
    },

    /// A dotted variable name did not contain a section and a key.
    #[error("invalid config key '{key}': expected section.key")]
    InvalidKey {
        /// The name as given by the caller.
        key: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error indicates an explicit path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitconf::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::NotExist { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_exist());
    /// ```
    #[must_use]
    pub fn is_not_exist(&self) -> bool {
        matches!(self, Self::NotExist { .. })
    }

    /// Check if error indicates that discovery found no repository.
    #[must_use]
    pub fn is_not_in_repo(&self) -> bool {
        matches!(self, Self::NotInRepo { .. })
    }

    /// Line number carried by tokenizer errors, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitconf::Error;
    ///
    /// let err = Error::MissingStartQuote { line: 2 };
    /// assert_eq!(err.line(), Some(2));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidKeyCharacter { line }
            | Self::MissingStartQuote { line }
            | Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }
}
