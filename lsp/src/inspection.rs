//! The inspection the host registers and calls once per file per pass.

use std::path::Path;

use lspi_types::ProblemRecord;

use crate::builder::build_problems;
use crate::protocol::path_to_file_uri;
use crate::session::{ProblemFactory, SessionRegistry};

/// Stable identifier; must match `[a-zA-Z_0-9.-]+`.
pub const INSPECTION_ID: &str = "LSP";
pub const SHORT_NAME: &str = "LSP";
pub const GROUP_DISPLAY_NAME: &str = "LSP";
pub const STATIC_DESCRIPTION: &str = "Reports errors by the LSP server";

/// Result of inspecting one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// Problems found by this pass, possibly none.
    Reported(Vec<ProblemRecord>),
    /// The pass could not be trusted; report nothing and wait for the next one.
    Aborted,
    /// Not ours to inspect; the host should run its default behavior.
    Delegated,
}

impl Inspection {
    /// The problems to show, if this pass produced a verdict.
    #[must_use]
    pub fn problems(&self) -> Option<&[ProblemRecord]> {
        match self {
            Self::Reported(problems) => Some(problems),
            Self::Aborted | Self::Delegated => None,
        }
    }

    #[must_use]
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated)
    }
}

pub struct LspInspection<R, F> {
    registry: R,
    factory: F,
}

impl<R: SessionRegistry, F: ProblemFactory> LspInspection<R, F> {
    pub fn new(registry: R, factory: F) -> Self {
        Self { registry, factory }
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        INSPECTION_ID
    }

    #[must_use]
    pub fn short_name(&self) -> &'static str {
        SHORT_NAME
    }

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        self.short_name()
    }

    #[must_use]
    pub fn group_display_name(&self) -> &'static str {
        GROUP_DISPLAY_NAME
    }

    #[must_use]
    pub fn static_description(&self) -> &'static str {
        STATIC_DESCRIPTION
    }

    #[must_use]
    pub fn is_enabled_by_default(&self) -> bool {
        true
    }

    #[must_use]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Inspect `file`. Never panics on collaborator faults.
    ///
    /// Unsupported files and files without a live session are [`Inspection::Delegated`];
    /// a pass that hit concurrent modification is [`Inspection::Aborted`].
    pub fn check_file(&self, file: &Path, is_preview: bool) -> Inspection {
        let extension = file.extension().and_then(|e| e.to_str());
        if !self.registry.is_extension_supported(extension) {
            return Inspection::Delegated;
        }

        let uri = match path_to_file_uri(file) {
            Ok(u) => u.to_string(),
            Err(e) => {
                tracing::debug!("Delegating inspection: {e}");
                return Inspection::Delegated;
            }
        };

        let Some(session) = self.registry.session_for(&uri) else {
            tracing::debug!(uri = %uri, "No LSP session, delegating inspection");
            return Inspection::Delegated;
        };

        match build_problems(&uri, file, session.as_ref(), &self.factory, is_preview) {
            Ok(problems) => Inspection::Reported(problems),
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "Inspection pass aborted");
                Inspection::Aborted
            }
        }
    }
}
