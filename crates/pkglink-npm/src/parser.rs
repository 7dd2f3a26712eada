//! package.json parser with position tracking.
//!
//! The manifest is validated with `serde_json` first, so syntax errors are
//! reported with serde's line/column diagnostics. A small span-tracking scanner
//! then walks the top-level object and records the byte span of every key in
//! the `dependencies` and `devDependencies` objects. Ranges therefore always
//! point at the actual dependency key, never at an unrelated occurrence of the
//! same text elsewhere in the file (e.g. in `scripts`).

use crate::types::{ManifestDependencies, NpmDependencyKey, NpmDependencySection};
use pkglink_core::{PkgLinkError, Result};
use serde::de::IgnoredAny;
use std::ops::Range as ByteSpan;

/// Parses a package.json file and extracts all dependency keys with spans.
///
/// Sections that are missing or are not JSON objects contribute no keys.
/// If a section key appears more than once at the top level, only the last
/// occurrence is used.
///
/// # Errors
///
/// Returns an error if:
/// - JSON parsing fails
/// - The top-level value is not an object
///
/// # Examples
///
/// ```
/// use pkglink_npm::parser::parse_package_json;
///
/// let json = r#"{
///   "dependencies": {
///     "express": "^4.18.2"
///   }
/// }"#;
///
/// let result = parse_package_json(json).unwrap();
/// assert_eq!(result.names(), vec!["express"]);
/// assert_eq!(&json[result.keys[0].span.clone()], "express");
/// ```
pub fn parse_package_json(content: &str) -> Result<ManifestDependencies> {
    serde_json::from_str::<IgnoredAny>(content)?;

    let mut scanner = Scanner::new(content);
    scanner.skip_whitespace();
    if scanner.peek() != Some(b'{') {
        return Err(PkgLinkError::InvalidStructure(
            "top-level value must be an object".into(),
        ));
    }

    let mut dependencies = None;
    let mut dev_dependencies = None;

    scanner.object_entries(|scanner, key_span| {
        // Section names never need escapes, so an undecodable key is not one
        let section = scanner
            .decode(key_span)
            .ok()
            .and_then(|key| NpmDependencySection::from_key(&key));

        match section {
            Some(section) if scanner.peek() == Some(b'{') => {
                let keys = scanner.collect_keys(section)?;
                match section {
                    NpmDependencySection::Dependencies => dependencies = Some(keys),
                    NpmDependencySection::DevDependencies => dev_dependencies = Some(keys),
                }
            }
            Some(section) => {
                tracing::debug!("ignoring non-object {} section", section.key());
                scanner.skip_value()?;
                match section {
                    NpmDependencySection::Dependencies => dependencies = None,
                    NpmDependencySection::DevDependencies => dev_dependencies = None,
                }
            }
            None => scanner.skip_value()?,
        }
        Ok(())
    })?;

    let mut keys: Vec<NpmDependencyKey> = dependencies
        .into_iter()
        .chain(dev_dependencies)
        .flatten()
        .collect();
    keys.sort_by_key(|k| k.span.start);

    Ok(ManifestDependencies { keys })
}

/// Byte-level JSON walker over already validated input.
///
/// UTF-8 continuation bytes never collide with the ASCII structural
/// characters, so scanning bytes is safe for arbitrary Unicode content.
struct Scanner<'a> {
    content: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            bytes: content.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> PkgLinkError {
        PkgLinkError::InvalidStructure(format!("unexpected input at byte {}", self.pos))
    }

    /// Skips a string token, returning the span of the raw text between the
    /// quotes. Escapes are not decoded.
    fn string(&mut self) -> Result<ByteSpan<usize>> {
        self.skip_whitespace();
        self.expect(b'"')?;
        let open = self.pos;

        loop {
            match self.peek() {
                Some(b'\\') => self.pos += 2,
                Some(b'"') => break,
                Some(_) => self.pos += 1,
                None => return Err(self.unexpected()),
            }
        }

        let close = self.pos;
        self.pos += 1;
        Ok(open..close)
    }

    /// Decodes the string whose raw text (without quotes) is at `span`.
    fn decode(&self, span: ByteSpan<usize>) -> Result<String> {
        let raw = self.content.get(span.clone()).ok_or_else(|| self.unexpected())?;
        if !raw.contains('\\') {
            return Ok(raw.to_string());
        }

        let quoted = self
            .content
            .get(span.start - 1..span.end + 1)
            .ok_or_else(|| self.unexpected())?;
        Ok(serde_json::from_str::<String>(quoted)?)
    }

    /// Iterates the entries of the object at the current position.
    ///
    /// The callback receives the raw span of the key, with the scanner
    /// positioned at the start of the value, and must consume the value.
    fn object_entries<F>(&mut self, mut on_entry: F) -> Result<()>
    where
        F: FnMut(&mut Self, ByteSpan<usize>) -> Result<()>,
    {
        self.expect(b'{')?;
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(());
        }

        loop {
            let key_span = self.string()?;
            self.expect(b':')?;
            self.skip_whitespace();
            on_entry(self, key_span)?;

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn collect_keys(&mut self, section: NpmDependencySection) -> Result<Vec<NpmDependencyKey>> {
        let mut keys = Vec::new();
        self.object_entries(|scanner, span| {
            keys.push(NpmDependencyKey {
                name: scanner.decode(span.clone())?,
                section,
                span,
            });
            scanner.skip_value()
        })?;
        Ok(keys)
    }

    fn skip_value(&mut self) -> Result<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.object_entries(|scanner, _| scanner.skip_value()),
            Some(b'[') => self.skip_array(),
            Some(b'"') => self.string().map(|_| ()),
            Some(_) => {
                // Numbers, true, false, null
                while let Some(b) = self.peek() {
                    if matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r') {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(())
            }
            None => Err(self.unexpected()),
        }
    }

    fn skip_array(&mut self) -> Result<()> {
        self.expect(b'[')?;
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(());
        }

        loop {
            self.skip_value()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => return Err(self.unexpected()),
            }
        }
    }
}
