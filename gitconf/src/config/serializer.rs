//! Rendering documents back to file text, and saving them.
//!
//! Output is canonical: sections and keys sorted, one tab of indentation,
//! ` = ` between key and value. Parsing canonical text and rendering it again
//! reproduces the input byte for byte.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::document::ConfigDocument;
use crate::config::include::IncludeResolver;
use crate::config::scope::Scope;
use crate::error::{Error, Result};

/// Replacement for each byte that needs escaping inside a value.
const VALUE_ESCAPES: [(u8, &[u8]); 5] = [
    (b'\n', b"\\n"),
    (b'\t', b"\\t"),
    (0x08, b"\\b"),
    (b'\\', b"\\\\"),
    (b'"', b"\\\""),
];

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn needs_quotes(value: &[u8]) -> bool {
    let edge_space = matches!(value.first(), Some(&b) if is_space(b))
        || matches!(value.last(), Some(&b) if is_space(b));
    // comment characters would otherwise end the value on re-parse, and
    // unescaped whitespace other than ' ' would read back as a space
    edge_space
        || value
            .iter()
            .any(|&b| matches!(b, b'#' | b';' | b'\r' | 0x0b | 0x0c))
}

fn push_value(out: &mut Vec<u8>, value: &str) {
    let bytes = value.as_bytes();
    let quote = needs_quotes(bytes);
    if quote {
        out.push(b'"');
    }
    for &b in bytes {
        match VALUE_ESCAPES.iter().find(|(raw, _)| *raw == b) {
            Some((_, escaped)) => out.extend_from_slice(escaped),
            None => out.push(b),
        }
    }
    if quote {
        out.push(b'"');
    }
}

fn push_header(out: &mut Vec<u8>, section: &str) {
    out.push(b'[');
    match section.split_once('.') {
        Some((name, sub)) => {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b" \"");
            for &b in sub.as_bytes() {
                if b == b'"' || b == b'\\' {
                    out.push(b'\\');
                }
                out.push(b);
            }
            out.push(b'"');
        }
        None => out.extend_from_slice(section.as_bytes()),
    }
    out.extend_from_slice(b"]\n");
}

impl ConfigDocument {
    /// Render the values whose scope is selected by `mask`.
    ///
    /// A value is emitted when its precedence bits intersect `mask`;
    /// include-tagged values additionally require `mask` to contain
    /// [`Scope::INCLUDE`]. Sections without any emitted value are omitted,
    /// and an empty selection renders as the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use gitconf::{ConfigDocument, Scope};
    ///
    /// let mut global = ConfigDocument::new();
    /// global.add("user.name", "Global").unwrap();
    /// let mut local = ConfigDocument::new();
    /// local.add("remote.origin.url", "/srv/repo.git").unwrap();
    ///
    /// let mut all = ConfigDocument::new();
    /// all.merge(&global, Scope::GLOBAL).merge(&local, Scope::SELF_);
    ///
    /// assert_eq!(
    ///     all.to_string_of_scope(Scope::SELF_),
    ///     "[remote \"origin\"]\n\turl = /srv/repo.git\n"
    /// );
    /// assert_eq!(all.to_string_of_scope(Scope::GLOBAL), "[user]\n\tname = Global\n");
    /// ```
    #[must_use]
    pub fn to_string_of_scope(&self, mask: Scope) -> String {
        let show_include = mask.is_include();
        let mask = mask.without_include();
        let mut out = Vec::new();

        for (section, keys) in self.iter_sections() {
            let mut header_written = false;
            for (key, values) in keys {
                for value in values {
                    let scope = value.scope();
                    if scope.is_include() && !show_include {
                        continue;
                    }
                    if !scope.without_include().intersects(mask) {
                        continue;
                    }
                    if !header_written {
                        push_header(&mut out, section);
                        header_written = true;
                    }
                    out.push(b'\t');
                    out.extend_from_slice(key.as_bytes());
                    out.extend_from_slice(b" = ");
                    push_value(&mut out, value.value());
                    out.push(b'\n');
                }
            }
        }

        // Only ASCII is inserted and values are valid UTF-8.
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Write the [`Scope::SELF_`] values to `path` atomically.
    ///
    /// The text goes to `<path>.lock` first and is parsed back before being
    /// renamed over `path`, so a failed save never leaves a half-written or
    /// unparsable target. The lock file is removed on every failure.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPath`] if `path` is empty
    /// - [`Error::Io`] if the lock file cannot be written or renamed
    /// - Tokenizer or include errors if the written text does not parse
    pub fn save(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: "cannot save config, unknown filename".to_string(),
            });
        }

        let lock = lock_path(path);
        let result = self.write_locked(&lock, path);
        if result.is_err() {
            let _ = fs::remove_file(&lock);
        }
        result
    }

    fn write_locked(&self, lock: &Path, path: &Path) -> Result<()> {
        fs::write(lock, self.to_string())?;
        IncludeResolver::load(lock)?;
        fs::rename(lock, path)?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

impl fmt::Display for ConfigDocument {
    /// Renders the document's own ([`Scope::SELF_`]) values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_of_scope(Scope::SELF_))
    }
}
