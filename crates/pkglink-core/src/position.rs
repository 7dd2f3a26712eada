//! Offset to LSP position mapping.
//!
//! LSP positions are zero-based lines with UTF-16 code unit columns, while the
//! manifest parser works in byte offsets. [`LineOffsetTable`] converts between
//! the two for a single document.

use std::ops::Range as ByteSpan;
use tower_lsp_server::ls_types::{Position, Range};

/// Line offset table for O(log n) position lookups.
///
/// Stores byte offsets of each line start, enabling fast binary search
/// for offset-to-line conversion. Build it once per document and reuse it
/// for every range computed from that document.
///
/// # Examples
///
/// ```
/// use pkglink_core::LineOffsetTable;
///
/// let content = "{\n  \"a\": 1\n}";
/// let table = LineOffsetTable::new(content);
/// let pos = table.position_from_offset(content, content.find("\"a\"").unwrap());
/// assert_eq!((pos.line, pos.character), (1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct LineOffsetTable {
    offsets: Vec<usize>,
}

impl LineOffsetTable {
    /// Builds a line offset table from content in O(n) time.
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// Number of lines in the document.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// Converts byte offset to line/character position in O(log n) time.
    ///
    /// Offsets past the end of `content` are clamped to its length.
    pub fn position_from_offset(&self, content: &str, offset: usize) -> Position {
        let offset = offset.min(content.len());
        let line = match self.offsets.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = self.offsets[line];

        // LSP columns count UTF-16 code units, not bytes
        let character = content
            .get(line_start..offset)
            .unwrap_or_default()
            .chars()
            .map(|c| c.len_utf16() as u32)
            .sum();

        Position::new(line as u32, character)
    }

    /// Converts a byte span into an LSP range.
    pub fn range_from_span(&self, content: &str, span: ByteSpan<usize>) -> Range {
        Range::new(
            self.position_from_offset(content, span.start),
            self.position_from_offset(content, span.end),
        )
    }

    /// Converts an LSP position back into a byte offset.
    ///
    /// Returns `None` if the line does not exist or the column points past the
    /// end of the line or into the middle of a surrogate pair.
    pub fn offset_from_position(&self, content: &str, position: Position) -> Option<usize> {
        let line_start = *self.offsets.get(position.line as usize)?;
        let line_end = self
            .offsets
            .get(position.line as usize + 1)
            .copied()
            .unwrap_or(content.len());
        let line = content.get(line_start..line_end)?;

        let mut units = 0u32;
        for (i, c) in line.char_indices() {
            if units == position.character {
                return Some(line_start + i);
            }
            units += c.len_utf16() as u32;
            if units > position.character {
                return None;
            }
        }

        (units == position.character).then_some(line_end)
    }

    /// Returns the document text covered by `range`.
    pub fn slice<'a>(&self, content: &'a str, range: Range) -> Option<&'a str> {
        let start = self.offset_from_position(content, range.start)?;
        let end = self.offset_from_position(content, range.end)?;
        content.get(start..end)
    }
}
