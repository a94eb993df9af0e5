//! Server-side positions and editor-side spans.
//!
//! The two coordinate spaces never mix: [`Position`]/[`Range`] are what a
//! language server reports, [`TextSpan`] is what the editor highlights.

use serde::{Deserialize, Serialize};

/// A location in a text document, in server coordinates.
///
/// `character` counts UTF-16 code units from the start of `line`, which is
/// the default LSP position encoding.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed UTF-16 column.
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range between two server positions. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the two ranges touch or intersect.
    ///
    /// Touching counts: a zero-width cursor range at the end of a diagnostic
    /// still asks for that diagnostic's fixes.
    #[must_use]
    pub fn overlaps(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A half-open `[start, end)` span of char offsets into one document snapshot.
///
/// Only non-empty spans exist: a diagnostic whose mapped start is not before
/// its mapped end has nothing to anchor a problem to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
    start: usize,
    end: usize,
}

impl TextSpan {
    /// Returns `None` when `start >= end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of chars covered. Always at least 1.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}
