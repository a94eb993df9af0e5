//! Document snapshots and server-position to editor-offset mapping.
//!
//! Servers address text by `(line, UTF-16 column)`; the editor addresses it by
//! char offset into a specific snapshot. A [`DocumentSnapshot`] indexes line
//! boundaries once so each conversion is a lookup plus a scan of one line.

use std::sync::Arc;

use lspi_types::{Position, TextSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineBounds {
    start_byte: usize,
    /// End of the line's content, before its terminator.
    content_end_byte: usize,
    start_char: usize,
}

/// An immutable, versioned view of a document's text.
///
/// Cloning is cheap; offsets computed against one snapshot are meaningless
/// for any other version.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    text: Arc<str>,
    version: u64,
    lines: Arc<[LineBounds]>,
    char_len: usize,
}

impl DocumentSnapshot {
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>, version: u64) -> Self {
        let text = text.into();
        let (lines, char_len) = index_lines(&text);
        Self {
            text,
            version,
            lines: lines.into(),
            char_len,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Length of the document in chars.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Absolute char offset of a server position.
    ///
    /// Never fails: a line past the end maps to the end of the document, a
    /// column past the end of its line maps to the end of that line, and a
    /// column inside a surrogate pair rounds up to the next char.
    #[must_use]
    pub fn offset_of(&self, position: Position) -> usize {
        let Some(line) = self.lines.get(position.line as usize) else {
            return self.char_len;
        };
        let content = &self.text[line.start_byte..line.content_end_byte];
        line.start_char + utf16_to_char_offset(content, position.character as usize)
    }

    /// Text covered by `span`, or `None` if it runs past the end.
    #[must_use]
    pub fn text_in(&self, span: TextSpan) -> Option<&str> {
        if span.end() > self.char_len {
            return None;
        }
        let start = self.byte_of(span.start());
        let end = self.byte_of(span.end());
        self.text.get(start..end)
    }

    fn byte_of(&self, char_offset: usize) -> usize {
        let idx = self
            .lines
            .partition_point(|line| line.start_char <= char_offset)
            .saturating_sub(1);
        let line = self.lines[idx];
        self.text[line.start_byte..]
            .char_indices()
            .nth(char_offset - line.start_char)
            .map(|(byte, _)| line.start_byte + byte)
            .unwrap_or(self.text.len())
    }
}

/// Convert a UTF-16 code unit column into a char column, clamped to the line.
fn utf16_to_char_offset(line: &str, utf16_offset: usize) -> usize {
    let mut current_utf16 = 0;
    let mut char_count = 0;

    for ch in line.chars() {
        if current_utf16 >= utf16_offset {
            break;
        }
        current_utf16 += ch.len_utf16();
        char_count += 1;
    }

    char_count
}

/// Split on `\n`, `\r\n` and lone `\r`. Always yields at least one line.
fn index_lines(text: &str) -> (Vec<LineBounds>, usize) {
    let mut lines = Vec::new();
    let mut start_byte = 0;
    let mut start_char = 0;
    let mut chars = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((byte, ch)) = iter.next() {
        chars += 1;
        let next_start = match ch {
            '\n' => byte + 1,
            '\r' => {
                if let Some(&(_, '\n')) = iter.peek() {
                    iter.next();
                    chars += 1;
                    byte + 2
                } else {
                    byte + 1
                }
            }
            _ => continue,
        };
        lines.push(LineBounds {
            start_byte,
            content_end_byte: byte,
            start_char,
        });
        start_byte = next_start;
        start_char = chars;
    }

    lines.push(LineBounds {
        start_byte,
        content_end_byte: text.len(),
        start_char,
    });
    (lines, chars)
}
