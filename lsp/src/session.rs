//! Seams to the collaborators the inspection runs against.
//!
//! The session manager owns the live diagnostics and the server connection;
//! the host owns problem construction. Both sit behind traits so the
//! pipeline can be driven by anything that can answer these calls.

use std::sync::Arc;

use lspi_types::{AnchorElement, CodeActionOrCommand, HighlightCategory, ProblemRecord, Remedy};

use crate::diagnostics::{DiagnosticsSnapshot, SnapshotError};
use crate::position::DocumentSnapshot;

/// A `textDocument/codeAction` result: `None` when the server has nothing
/// (or no code-action capability); entries may themselves be `null`.
pub type CodeActionResponse = Option<Vec<Option<CodeActionOrCommand>>>;

/// One open editor bound to a language-server session.
pub trait EditorSession: Send + Sync {
    /// Whether the editor backing this session has been torn down.
    fn is_disposed(&self) -> bool;

    /// The current text.
    fn document(&self) -> DocumentSnapshot;

    /// Version of the current text, without building a snapshot.
    fn document_version(&self) -> u64;

    /// Point-in-time copy of the diagnostics for this session's document.
    fn diagnostics(&self) -> Result<DiagnosticsSnapshot, SnapshotError>;

    /// Fail with [`SnapshotError::Mutated`] if the live diagnostics moved on
    /// since `snapshot` was taken. Sessions that keep no live list can
    /// return `Ok(())`.
    fn verify_diagnostics(&self, snapshot: &DiagnosticsSnapshot) -> Result<(), SnapshotError>;

    /// Ask the server for fixes at `anchor`. May block on the server;
    /// timeouts are the implementation's business.
    fn code_action(&self, anchor: &AnchorElement) -> anyhow::Result<CodeActionResponse>;
}

/// Resolves which files the inspection handles and the session for each.
pub trait SessionRegistry: Send + Sync {
    /// `extension` is the file extension without the dot, if the file has one.
    fn is_extension_supported(&self, extension: Option<&str>) -> bool;

    fn session_for(&self, uri: &str) -> Option<Arc<dyn EditorSession>>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("invalid anchor: {reason}")]
    InvalidAnchor { reason: String },
    /// The host isn't able to accept problems yet (e.g. still starting up).
    #[error("problem host is not ready")]
    NotReady,
}

/// Host-side construction of problem records.
///
/// Two entry points, mirroring the two outcomes of a fix lookup: no fix
/// support at all, or a (possibly empty) list of fixes.
pub trait ProblemFactory {
    fn create(
        &self,
        anchor: AnchorElement,
        message: &str,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
    ) -> Result<ProblemRecord, ConstructionError>;

    fn create_with_remedies(
        &self,
        anchor: AnchorElement,
        message: &str,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
        remedies: Vec<Remedy>,
    ) -> Result<ProblemRecord, ConstructionError>;
}

/// Builds records directly, rejecting anchors whose text and span disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProblemFactory;

impl DefaultProblemFactory {
    fn check(anchor: &AnchorElement) -> Result<(), ConstructionError> {
        let chars = anchor.text().chars().count();
        if chars == anchor.span().char_len() {
            Ok(())
        } else {
            Err(ConstructionError::InvalidAnchor {
                reason: format!(
                    "text has {chars} chars but span covers {}",
                    anchor.span().char_len()
                ),
            })
        }
    }
}

impl ProblemFactory for DefaultProblemFactory {
    fn create(
        &self,
        anchor: AnchorElement,
        message: &str,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
    ) -> Result<ProblemRecord, ConstructionError> {
        Self::check(&anchor)?;
        Ok(ProblemRecord::new(anchor, message, highlight, is_preview))
    }

    fn create_with_remedies(
        &self,
        anchor: AnchorElement,
        message: &str,
        highlight: Option<HighlightCategory>,
        is_preview: bool,
        remedies: Vec<Remedy>,
    ) -> Result<ProblemRecord, ConstructionError> {
        Self::check(&anchor)?;
        Ok(ProblemRecord::with_remedies(
            anchor, message, highlight, is_preview, remedies,
        ))
    }
}
