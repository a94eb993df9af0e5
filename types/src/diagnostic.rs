//! Diagnostics as published by a language server.

use crate::position::Range;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

impl DiagnosticSeverity {
    /// Convert from LSP numeric severity (1=Error, 2=Warning, 3=Info, 4=Hint).
    ///
    /// Returns `None` for values outside the LSP-defined range.
    /// Callers (boundary code) decide the fallback policy.
    #[must_use]
    pub fn from_lsp(value: u64) -> Option<Self> {
        match value {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Information),
            4 => Some(Self::Hint),
            _ => None,
        }
    }

    /// The LSP numeric value, the inverse of [`Self::from_lsp`].
    #[must_use]
    pub fn to_lsp(self) -> u64 {
        self as u64
    }
}

/// A single diagnostic from a language server.
///
/// Fields are private: a diagnostic is immutable once received. The session
/// manager owns the live list; the inspection only reads copies of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    range: Range,
    /// `None` when the server left severity unset.
    severity: Option<DiagnosticSeverity>,
    message: String,
    source: Option<String>,
    code: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        range: Range,
        severity: Option<DiagnosticSeverity>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            source: None,
            code: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn severity(&self) -> Option<DiagnosticSeverity> {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source of the diagnostic (e.g. "rustc", "clippy").
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}
