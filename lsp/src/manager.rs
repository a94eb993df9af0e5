//! LspManager: the session registry the inspection looks sessions up in.
//!
//! Owns the extension routing built from config, the open editor sessions
//! keyed by URI, and the shared [`DiagnosticsStore`] that server traffic is
//! written into. Server transport lives elsewhere; it reports here through
//! [`LspEvent`]s.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lspi_types::Diagnostic;

use crate::config::{ExtensionMap, InspectionConfig};
use crate::diagnostics::DiagnosticsStore;
use crate::protocol::{PublishDiagnosticsParams, file_uri_to_path};
use crate::session::{EditorSession, SessionRegistry};

/// An event from the server side of a session.
#[derive(Debug)]
pub enum LspEvent {
    /// Diagnostics replaced for a document.
    Diagnostics { uri: String, items: Vec<Diagnostic> },
    /// The document was closed; its session and diagnostics go away.
    Closed { uri: String },
}

pub struct LspManager {
    extension_map: ExtensionMap,
    sessions: RwLock<HashMap<String, Arc<dyn EditorSession>>>,
    diagnostics: Arc<DiagnosticsStore>,
}

impl LspManager {
    #[must_use]
    pub fn new(config: &InspectionConfig) -> Self {
        Self {
            extension_map: ExtensionMap::from_config(config),
            sessions: RwLock::new(HashMap::new()),
            diagnostics: Arc::new(DiagnosticsStore::new()),
        }
    }

    /// The store sessions should read their diagnostics from.
    #[must_use]
    pub fn diagnostics(&self) -> Arc<DiagnosticsStore> {
        Arc::clone(&self.diagnostics)
    }

    /// Register the session for `uri`, replacing any previous one.
    pub fn attach(&self, uri: impl Into<String>, session: Arc<dyn EditorSession>) {
        let uri = uri.into();
        tracing::debug!(uri = %uri, "Session attached");
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uri, session);
    }

    pub fn detach(&self, uri: &str) {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(uri);
        if removed.is_some() {
            tracing::debug!(uri = %uri, "Session detached");
        }
        self.diagnostics.forget(uri);
    }

    /// Record a `textDocument/publishDiagnostics` notification.
    pub fn handle_publish(&self, params: &PublishDiagnosticsParams) {
        self.handle_event(LspEvent::Diagnostics {
            uri: params.uri.clone(),
            items: params.to_diagnostics(),
        });
    }

    pub fn handle_event(&self, event: LspEvent) {
        match event {
            LspEvent::Diagnostics { uri, items } => {
                // Only files on disk are ever inspected.
                if file_uri_to_path(&uri).is_none() {
                    tracing::debug!(uri = %uri, "Ignoring diagnostics for non-file URI");
                    return;
                }
                tracing::debug!(uri = %uri, count = items.len(), "Diagnostics updated");
                self.diagnostics.publish(&uri, items);
            }
            LspEvent::Closed { uri } => self.detach(&uri),
        }
    }
}

impl SessionRegistry for LspManager {
    fn is_extension_supported(&self, extension: Option<&str>) -> bool {
        self.extension_map.is_supported(extension)
    }

    fn session_for(&self, uri: &str) -> Option<Arc<dyn EditorSession>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uri)
            .cloned()
    }
}
