//! In-memory collaborators for unit tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use lspi_types::{
    AnchorElement, CodeAction, CodeActionOrCommand, Command, Diagnostic, DiagnosticSeverity,
    Position, Range, TextSpan,
};

use crate::diagnostics::{DiagnosticsSnapshot, DiagnosticsStore, SnapshotError};
use crate::position::DocumentSnapshot;
use crate::session::{CodeActionResponse, EditorSession};

pub(crate) const TEST_URI: &str = "file:///src/main.rs";

enum CodeActions {
    Null,
    List(Vec<Option<CodeActionOrCommand>>),
    Fail,
}

pub(crate) struct FakeSession {
    text: Mutex<String>,
    version: AtomicU64,
    disposed: AtomicBool,
    store: Arc<DiagnosticsStore>,
    snapshot_fails: bool,
    code_actions: CodeActions,
    edit_on_code_action: bool,
    publish_on_code_action: bool,
    requested: Mutex<Vec<AnchorElement>>,
}

impl FakeSession {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: Mutex::new(text.to_string()),
            version: AtomicU64::new(1),
            disposed: AtomicBool::new(false),
            store: Arc::new(DiagnosticsStore::new()),
            snapshot_fails: false,
            code_actions: CodeActions::Null,
            edit_on_code_action: false,
            publish_on_code_action: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_diagnostics(self, items: Vec<Diagnostic>) -> Self {
        self.store.publish(TEST_URI, items);
        self
    }

    pub(crate) fn with_code_actions(mut self, items: Vec<Option<CodeActionOrCommand>>) -> Self {
        self.code_actions = CodeActions::List(items);
        self
    }

    pub(crate) fn with_failing_code_actions(mut self) -> Self {
        self.code_actions = CodeActions::Fail;
        self
    }

    pub(crate) fn with_failing_snapshot(mut self) -> Self {
        self.snapshot_fails = true;
        self
    }

    /// Simulate the user typing while the server is asked for fixes.
    pub(crate) fn editing_during_code_action(mut self) -> Self {
        self.edit_on_code_action = true;
        self
    }

    /// Simulate the server publishing fresh diagnostics mid-pass.
    pub(crate) fn publishing_during_code_action(mut self) -> Self {
        self.publish_on_code_action = true;
        self
    }

    pub(crate) fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub(crate) fn requested_anchors(&self) -> Vec<AnchorElement> {
        self.requested.lock().unwrap().clone()
    }
}

impl EditorSession for FakeSession {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn document(&self) -> DocumentSnapshot {
        let text = self.text.lock().unwrap().clone();
        DocumentSnapshot::new(text, self.version.load(Ordering::SeqCst))
    }

    fn document_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    fn diagnostics(&self) -> Result<DiagnosticsSnapshot, SnapshotError> {
        if self.snapshot_fails {
            return Err(SnapshotError::Poisoned {
                uri: TEST_URI.to_string(),
            });
        }
        self.store.snapshot(TEST_URI)
    }

    fn verify_diagnostics(&self, snapshot: &DiagnosticsSnapshot) -> Result<(), SnapshotError> {
        snapshot.verify(&self.store)
    }

    fn code_action(&self, anchor: &AnchorElement) -> anyhow::Result<CodeActionResponse> {
        self.requested.lock().unwrap().push(anchor.clone());
        if self.edit_on_code_action {
            self.text.lock().unwrap().push('x');
            self.version.fetch_add(1, Ordering::SeqCst);
        }
        if self.publish_on_code_action {
            self.store.publish(TEST_URI, Vec::new());
        }
        match &self.code_actions {
            CodeActions::Null => Ok(None),
            CodeActions::List(items) => Ok(Some(items.clone())),
            CodeActions::Fail => anyhow::bail!("server went away"),
        }
    }
}

pub(crate) fn diag(
    start: (u32, u32),
    end: (u32, u32),
    severity: Option<DiagnosticSeverity>,
    message: &str,
) -> Diagnostic {
    Diagnostic::new(
        Range::new(
            Position::new(start.0, start.1),
            Position::new(end.0, end.1),
        ),
        severity,
        message,
    )
}

pub(crate) fn anchor_at(start: usize, end: usize, text: &str) -> AnchorElement {
    AnchorElement::new(
        text,
        TextSpan::new(start, end).unwrap(),
        Range::default(),
        1,
        "/src/main.rs",
    )
}

pub(crate) fn command(title: &str) -> CodeActionOrCommand {
    CodeActionOrCommand::Command(Command {
        title: title.to_string(),
        command: format!("test.{title}"),
        arguments: Vec::new(),
    })
}

pub(crate) fn code_action(title: &str) -> CodeActionOrCommand {
    CodeActionOrCommand::CodeAction(CodeAction {
        title: title.to_string(),
        kind: Some("quickfix".to_string()),
        edit: None,
        command: None,
        is_preferred: false,
        data: None,
    })
}
