//! Quick-fix resolution for a single diagnostic anchor.

use lspi_types::{AnchorElement, CodeActionOrCommand, Remedy};

use crate::session::EditorSession;

/// Outcome of asking a session for fixes.
#[derive(Debug, Clone, PartialEq)]
pub enum Remedies {
    /// No answer: no code-action support, a `null` result, or a failed request.
    Unavailable,
    /// The server answered; the list may be empty.
    Resolved(Vec<Remedy>),
}

/// Request fixes for `anchor` and bind each to `uri`.
pub fn resolve_remedies(
    uri: &str,
    session: &dyn EditorSession,
    anchor: &AnchorElement,
) -> Remedies {
    match session.code_action(anchor) {
        Ok(Some(items)) => Remedies::Resolved(partition_remedies(uri, items)),
        Ok(None) => Remedies::Unavailable,
        Err(e) => {
            tracing::warn!(uri = %uri, error = %e, "Code action request failed");
            Remedies::Unavailable
        }
    }
}

/// Commands first, then code actions, each in the order the server sent them.
/// `null` entries are dropped.
#[must_use]
pub fn partition_remedies(uri: &str, items: Vec<Option<CodeActionOrCommand>>) -> Vec<Remedy> {
    let mut commands = Vec::new();
    let mut actions = Vec::new();

    for item in items.into_iter().flatten() {
        match item {
            CodeActionOrCommand::Command(command) => {
                tracing::trace!(title = %command.title, "Command remedy");
                commands.push(Remedy::Command {
                    uri: uri.to_string(),
                    command,
                });
            }
            CodeActionOrCommand::CodeAction(action) => {
                tracing::trace!(title = %action.title, "Code action remedy");
                actions.push(Remedy::CodeAction {
                    uri: uri.to_string(),
                    action,
                });
            }
        }
    }

    commands.extend(actions);
    commands
}
