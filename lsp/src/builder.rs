//! Turns one session's diagnostics into problem records for the editor.
//!
//! A single pass, in diagnostic order: map each range onto the current
//! document, style it, ask the server for fixes, and hand everything to the
//! host's [`ProblemFactory`]. Per-diagnostic faults skip that diagnostic;
//! faults that make the whole pass untrustworthy abort it.

use std::path::Path;

use lspi_types::{AnchorElement, ProblemRecord, TextSpan};

use crate::diagnostics::SnapshotError;
use crate::fixes::{Remedies, resolve_remedies};
use crate::session::{EditorSession, ProblemFactory};
use crate::severity::classify;

/// Conditions under which a pass returns nothing rather than a partial list.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InspectError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// The document was edited while the pass was mapping offsets into it.
    #[error("document changed during the pass (version {expected} -> {found})")]
    DocumentChanged { expected: u64, found: u64 },
}

/// Build the problems for `uri` from `session`'s current diagnostics.
///
/// Returns an empty list if the editor is already gone.
pub fn build_problems(
    uri: &str,
    file: &Path,
    session: &dyn EditorSession,
    factory: &dyn ProblemFactory,
    is_preview: bool,
) -> Result<Vec<ProblemRecord>, InspectError> {
    if session.is_disposed() {
        tracing::debug!(uri = %uri, "Editor disposed, skipping inspection");
        return Ok(Vec::new());
    }

    let diagnostics = session.diagnostics()?;
    let document = session.document();
    let mut problems = Vec::with_capacity(diagnostics.len());

    for diagnostic in &diagnostics {
        let range = diagnostic.range();
        let start = document.offset_of(range.start);
        let end = document.offset_of(range.end);
        let Some(span) = TextSpan::new(start, end) else {
            tracing::debug!(
                uri = %uri,
                line = range.start.line,
                character = range.start.character,
                "Skipping empty diagnostic range"
            );
            continue;
        };
        let Some(text) = document.text_in(span) else {
            tracing::debug!(
                uri = %uri,
                start = span.start(),
                end = span.end(),
                "Skipping diagnostic outside the document text"
            );
            continue;
        };

        let highlight = classify(diagnostic.severity());
        let anchor = AnchorElement::new(text, span, range, document.version(), file);
        let message = diagnostic.message();

        let created = match resolve_remedies(uri, session, &anchor) {
            Remedies::Unavailable => factory.create(anchor, message, highlight, is_preview),
            Remedies::Resolved(remedies) => {
                factory.create_with_remedies(anchor, message, highlight, is_preview, remedies)
            }
        };
        match created {
            Ok(problem) => problems.push(problem),
            Err(e) => {
                tracing::warn!(
                    uri = %uri,
                    message = %message,
                    error = %e,
                    "Dropping problem the host rejected"
                );
            }
        }
    }

    session.verify_diagnostics(&diagnostics)?;

    let found = session.document_version();
    if found != document.version() {
        return Err(InspectError::DocumentChanged {
            expected: document.version(),
            found,
        });
    }

    tracing::debug!(
        uri = %uri,
        diagnostics = diagnostics.len(),
        problems = problems.len(),
        "Inspection pass complete"
    );
    Ok(problems)
}
