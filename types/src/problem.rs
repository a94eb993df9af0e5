//! Displayable problems and the anchors they hang off.

use std::path::{Path, PathBuf};

use crate::position::{Range, TextSpan};
use crate::remedy::Remedy;

/// How the editor styles a problem.
///
/// A problem with no category (`Option::None` wherever this type appears) is
/// still shown, just without severity styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightCategory {
    GenericError,
    GenericErrorOrWarning,
    Information,
}

/// A lightweight stand-in for a syntax element covering a diagnostic.
///
/// Carries just enough to locate the text in one document snapshot and to ask
/// the server for fixes at that location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorElement {
    text: String,
    span: TextSpan,
    /// The same location in server coordinates.
    range: Range,
    /// Version of the document snapshot `span` refers to.
    document_version: u64,
    file: PathBuf,
}

impl AnchorElement {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        span: TextSpan,
        range: Range,
        document_version: u64,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            text: text.into(),
            span,
            range,
            document_version,
            file: file.into(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.span
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn document_version(&self) -> u64 {
        self.document_version
    }

    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// One problem for the editor to render. Created fresh on every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    anchor: AnchorElement,
    message: String,
    highlight: Option<HighlightCategory>,
    remedies: Vec<Remedy>,
    is_preview: bool,
}

impl ProblemRecord {
    /// A problem offering no fixes.
    #[must_use]
    pub fn new(
        anchor: AnchorElement,
        message: impl Into<String>,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
    ) -> Self {
        Self::with_remedies(anchor, message, highlight, is_preview, Vec::new())
    }

    #[must_use]
    pub fn with_remedies(
        anchor: AnchorElement,
        message: impl Into<String>,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
        remedies: Vec<Remedy>,
    ) -> Self {
        Self {
            anchor,
            message: message.into(),
            highlight,
            remedies,
            is_preview,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> &AnchorElement {
        &self.anchor
    }

    #[must_use]
    pub fn span(&self) -> TextSpan {
        self.anchor.span()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn highlight(&self) -> Option<HighlightCategory> {
        self.highlight
    }

    #[must_use]
    pub fn remedies(&self) -> &[Remedy] {
        &self.remedies
    }

    /// Whether the pass that produced this problem was an on-the-fly preview.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        self.is_preview
    }
}
