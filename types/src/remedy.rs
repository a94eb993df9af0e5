//! Commands, code actions, and the remedies built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::position::Range;

/// An opaque server-defined action, executed by sending it back to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub title: String,
    /// Server-side command identifier.
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// Edits across one or more documents, keyed by URI.
///
/// `document_changes` is carried through untouched; only the server that
/// produced it and the code that applies it need to understand it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEdit {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub changes: BTreeMap<String, Vec<TextEdit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_changes: Option<serde_json::Value>,
}

/// A server-proposed fix bundling an optional edit and/or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<WorkspaceEdit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Command>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_preferred: bool,
    /// Opaque payload for `codeAction/resolve`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// One entry of a `textDocument/codeAction` response.
///
/// The wire format is an untagged union: a `Command` has a string `command`
/// field, a `CodeAction`'s `command` (if any) is an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeActionOrCommand {
    Command(Command),
    CodeAction(CodeAction),
}

/// A quick fix attached to a problem.
///
/// Both variants carry the URI of the document whose session produced them,
/// so applying the fix can be routed back to the right server.
#[derive(Debug, Clone, PartialEq)]
pub enum Remedy {
    Command { uri: String, command: Command },
    CodeAction { uri: String, action: CodeAction },
}

impl Remedy {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Command { uri, .. } | Self::CodeAction { uri, .. } => uri,
        }
    }

    /// Human-readable label offered to the user.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Command { command, .. } => &command.title,
            Self::CodeAction { action, .. } => &action.title,
        }
    }

    #[must_use]
    pub fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }
}
