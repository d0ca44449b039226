//! Tokenizer for the git-config file dialect.
//!
//! Turns raw file bytes into an ordered list of `(section.key, value)`
//! entries. The tokenizer knows nothing about scopes or includes; that is
//! layered on top by [`crate::config::include`].
//!
//! Supported syntax:
//!
//! ```text
//! # comment
//! ; comment
//! [section]
//!     key = value
//!     flag                 ; implicit boolean, stored as "true"
//! [section "sub section"]
//!     key = "  quoted, with \"escapes\"\t"
//!     long = first \
//!            continued
//! ```

use crate::error::{Error, Result};

/// One variable assignment as it appears in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Dotted name: `section[.subsection].key`. Section and key are
    /// lower-cased; the subsection keeps its spelling.
    pub key: String,
    /// Decoded value (quotes removed, escapes resolved).
    pub value: String,
    /// 1-based line on which the assignment starts.
    pub line: usize,
}

/// Tokenize a configuration file.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyCharacter`], [`Error::MissingStartQuote`] or
/// [`Error::Syntax`] carrying the 1-based line of the first fault.
///
/// # Examples
///
/// ```
/// use gitconf::config::parser::parse;
///
/// let entries = parse(b"[a \"b\"]\n\tc = d\n").unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].key, "a.b.c");
/// assert_eq!(entries[0].value, "d");
/// ```
pub fn parse(bytes: &[u8]) -> Result<Vec<RawEntry>> {
    if let Err(e) = std::str::from_utf8(bytes) {
        let line = 1 + bytes[..e.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        return Err(Error::Syntax {
            line,
            reason: "invalid UTF-8".to_string(),
        });
    }

    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Tokenizer::new(bytes).run()
}

struct Tokenizer<'a> {
    src: &'a [u8],
    pos: usize,
    line: usize,
    section: Option<String>,
    entries: Vec<RawEntry>,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            section: None,
            entries: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn syntax(&self, reason: &str) -> Error {
        Error::Syntax {
            line: self.line,
            reason: reason.to_string(),
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
            self.pos += 1;
        }
    }

    fn skip_to_eol(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.pos += 1;
        }
    }

    fn run(mut self) -> Result<Vec<RawEntry>> {
        loop {
            match self.peek() {
                None => break,
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.bump();
                }
                Some(b'#' | b';') => self.skip_to_eol(),
                Some(b'[') => {
                    self.bump();
                    self.section_header()?;
                }
                Some(c) if c.is_ascii_alphabetic() => self.variable()?,
                Some(_) => return Err(Error::InvalidKeyCharacter { line: self.line }),
            }
        }
        Ok(self.entries)
    }

    fn section_header(&mut self) -> Result<()> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'-' || c == b'.' {
                name.push(char::from(c.to_ascii_lowercase()));
                self.pos += 1;
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.syntax("empty section name"));
        }

        match self.peek() {
            Some(b']') => {
                self.pos += 1;
                self.section = Some(name);
                Ok(())
            }
            Some(b' ' | b'\t') => {
                self.skip_blanks();
                if self.peek() != Some(b'"') {
                    return Err(Error::MissingStartQuote { line: self.line });
                }
                self.pos += 1;
                let subsection = self.subsection()?;
                if self.peek() != Some(b']') {
                    return Err(self.syntax("expected ']' after subsection"));
                }
                self.pos += 1;
                self.section = Some(format!("{name}.{subsection}"));
                Ok(())
            }
            _ => Err(self.syntax("invalid character in section name")),
        }
    }

    fn subsection(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => return Err(self.syntax("unterminated subsection name")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        None | Some(b'\n') => {
                            return Err(self.syntax("unterminated subsection name"))
                        }
                        Some(c) => {
                            buf.push(c);
                            self.pos += 1;
                        }
                    }
                }
                Some(c) => {
                    buf.push(c);
                    self.pos += 1;
                }
            }
        }
        String::from_utf8(buf).map_err(|_| self.syntax("invalid UTF-8"))
    }

    fn variable(&mut self) -> Result<()> {
        let line = self.line;
        let Some(section) = self.section.clone() else {
            return Err(self.syntax("variable outside of a section"));
        };

        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'-' {
                name.push(char::from(c.to_ascii_lowercase()));
                self.pos += 1;
            } else {
                break;
            }
        }

        self.skip_blanks();
        let value = match self.peek() {
            None | Some(b'\n') => "true".to_string(),
            Some(b'=') => {
                self.pos += 1;
                self.value()?
            }
            Some(_) => return Err(Error::InvalidKeyCharacter { line: self.line }),
        };

        self.entries.push(RawEntry {
            key: format!("{section}.{name}"),
            value,
            line,
        });
        Ok(())
    }

    fn value(&mut self) -> Result<String> {
        self.skip_blanks();

        let mut buf: Vec<u8> = Vec::new();
        let mut quoted = false;
        let mut pending_spaces = 0usize;

        loop {
            let Some(c) = self.peek() else {
                if quoted {
                    return Err(self.syntax("unterminated quoted value"));
                }
                break;
            };

            if c == b'\n' {
                if quoted {
                    return Err(self.syntax("unterminated quoted value"));
                }
                break;
            }

            if !quoted {
                if c == b'#' || c == b';' {
                    self.skip_to_eol();
                    break;
                }
                if c.is_ascii_whitespace() {
                    if !buf.is_empty() {
                        pending_spaces += 1;
                    }
                    self.pos += 1;
                    continue;
                }
            }

            buf.extend(std::iter::repeat(b' ').take(pending_spaces));
            pending_spaces = 0;
            self.pos += 1;

            match c {
                b'\\' => match self.peek() {
                    Some(b'\n') => {
                        self.bump();
                    }
                    Some(b'\r') if self.src.get(self.pos + 1) == Some(&b'\n') => {
                        self.pos += 1;
                        self.bump();
                    }
                    Some(e) => {
                        let decoded = match e {
                            b'n' => b'\n',
                            b't' => b'\t',
                            b'b' => b'\x08',
                            b'\\' => b'\\',
                            b'"' => b'"',
                            _ => return Err(self.syntax("invalid escape sequence")),
                        };
                        buf.push(decoded);
                        self.pos += 1;
                    }
                    None => return Err(self.syntax("trailing backslash")),
                },
                b'"' => quoted = !quoted,
                _ => buf.push(c),
            }
        }

        String::from_utf8(buf).map_err(|_| self.syntax("invalid UTF-8"))
    }
}
