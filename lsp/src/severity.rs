//! Diagnostic severity to editor highlight mapping.

use lspi_types::{DiagnosticSeverity, HighlightCategory};

/// Map a diagnostic severity onto the editor's highlight category.
///
/// Hints share the informational style. An unset severity yields `None`: the
/// problem is still reported, only unstyled.
#[must_use]
pub fn classify(severity: Option<DiagnosticSeverity>) -> Option<HighlightCategory> {
    match severity? {
        DiagnosticSeverity::Error => Some(HighlightCategory::GenericError),
        DiagnosticSeverity::Warning => Some(HighlightCategory::GenericErrorOrWarning),
        DiagnosticSeverity::Information | DiagnosticSeverity::Hint => {
            Some(HighlightCategory::Information)
        }
    }
}
