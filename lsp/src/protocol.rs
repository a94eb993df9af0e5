//! LSP message serde types and helpers for the diagnostics/code-action pair.

use std::path::{Path, PathBuf};

use lspi_types::{AnchorElement, Diagnostic, DiagnosticSeverity, Range};
use serde::Deserialize;

use crate::session::CodeActionResponse;

#[derive(Debug, thiserror::Error)]
#[error("cannot convert path to file URI: {}", path.display())]
pub struct PathToUriError {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct PublishDiagnosticsParams {
    pub uri: String,
    #[serde(default)]
    pub version: Option<i64>,
    pub diagnostics: Vec<LspDiagnostic>,
}

impl PublishDiagnosticsParams {
    /// Domain diagnostics in the order the server sent them.
    #[must_use]
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .iter()
            .map(LspDiagnostic::to_diagnostic)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct LspDiagnostic {
    pub range: Range,
    pub severity: Option<u64>,
    pub source: Option<String>,
    pub code: Option<serde_json::Value>,
    pub message: String,
}

impl LspDiagnostic {
    /// Severities outside 1..=4 are treated as unset.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let severity = self.severity.and_then(DiagnosticSeverity::from_lsp);
        let mut diagnostic = Diagnostic::new(self.range, severity, self.message.clone());
        if let Some(source) = &self.source {
            diagnostic = diagnostic.with_source(source.clone());
        }
        match &self.code {
            Some(serde_json::Value::String(s)) => diagnostic.with_code(s.clone()),
            Some(serde_json::Value::Number(n)) => diagnostic.with_code(n.to_string()),
            _ => diagnostic,
        }
    }
}

fn diagnostic_to_json(diagnostic: &Diagnostic) -> serde_json::Value {
    let mut value = serde_json::json!({
        "range": diagnostic.range(),
        "message": diagnostic.message(),
    });
    if let Some(severity) = diagnostic.severity() {
        value["severity"] = severity.to_lsp().into();
    }
    if let Some(source) = diagnostic.source() {
        value["source"] = source.into();
    }
    if let Some(code) = diagnostic.code() {
        value["code"] = code.into();
    }
    value
}

/// Params for a `textDocument/codeAction` request at `anchor`.
///
/// The context lists the diagnostics touching the anchor's range, which is
/// what servers key their quick fixes on.
#[must_use]
pub fn code_action_params(
    uri: &str,
    anchor: &AnchorElement,
    diagnostics: &[Diagnostic],
) -> serde_json::Value {
    let range = anchor.range();
    let context: Vec<serde_json::Value> = diagnostics
        .iter()
        .filter(|d| d.range().overlaps(&range))
        .map(diagnostic_to_json)
        .collect();
    serde_json::json!({
        "textDocument": { "uri": uri },
        "range": range,
        "context": { "diagnostics": context }
    })
}

/// Parse the `result` of a `textDocument/codeAction` response.
///
/// `null` means no answer. Inside the array, `null` entries are kept as
/// `None`; the caller decides to skip them.
pub fn parse_code_action_response(
    result: serde_json::Value,
) -> Result<CodeActionResponse, serde_json::Error> {
    serde_json::from_value(result)
}

pub fn path_to_file_uri(path: &Path) -> Result<url::Url, PathToUriError> {
    url::Url::from_file_path(path).map_err(|()| PathToUriError {
        path: path.to_path_buf(),
    })
}

#[must_use]
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    url::Url::parse(uri)
        .ok()
        .and_then(|u| u.to_file_path().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lspi_types::{CodeActionOrCommand, Position, TextSpan};

    #[test]
    fn test_lsp_diagnostic_conversion() {
        let lsp_diag: LspDiagnostic = serde_json::from_value(serde_json::json!({
            "range": { "start": { "line": 10, "character": 5 }, "end": { "line": 10, "character": 9 } },
            "severity": 1,
            "source": "rustc",
            "code": "E0425",
            "message": "expected `;`"
        }))
        .unwrap();

        let diag = lsp_diag.to_diagnostic();
        assert_eq!(diag.severity(), Some(DiagnosticSeverity::Error));
        assert_eq!(diag.range().start, Position::new(10, 5));
        assert_eq!(diag.range().end, Position::new(10, 9));
        assert_eq!(diag.source(), Some("rustc"));
        assert_eq!(diag.code(), Some("E0425"));
    }

    #[test]
    fn test_numeric_code_becomes_string() {
        let lsp_diag: LspDiagnostic = serde_json::from_value(serde_json::json!({
            "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 1 } },
            "code": 2304,
            "message": "cannot find name"
        }))
        .unwrap();
        assert_eq!(lsp_diag.to_diagnostic().code(), Some("2304"));
    }

    #[test]
    fn test_publish_diagnostics_no_severity() {
        // Severity is optional in LSP; unset stays unset.
        let json = serde_json::json!({
            "uri": "file:///test.rs",
            "diagnostics": [{
                "range": { "start": { "line": 5, "character": 3 }, "end": { "line": 5, "character": 10 } },
                "message": "some warning"
            }]
        });
        let params: PublishDiagnosticsParams = serde_json::from_value(json).unwrap();
        let diags = params.to_diagnostics();
        assert_eq!(diags[0].severity(), None);
        assert_eq!(diags[0].source(), None);
    }

    #[test]
    fn test_publish_diagnostics_out_of_range_severity() {
        let json = serde_json::json!({
            "uri": "file:///test.rs",
            "version": 4,
            "diagnostics": [{
                "range": { "start": { "line": 0, "character": 0 }, "end": { "line": 0, "character": 1 } },
                "severity": 9,
                "message": "odd"
            }]
        });
        let params: PublishDiagnosticsParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.version, Some(4));
        assert_eq!(params.to_diagnostics()[0].severity(), None);
    }

    #[test]
    fn test_publish_diagnostics_empty_diagnostics() {
        // Server clears diagnostics by publishing an empty array
        let json = serde_json::json!({
            "uri": "file:///test.rs",
            "diagnostics": []
        });
        let params: PublishDiagnosticsParams = serde_json::from_value(json).unwrap();
        assert!(params.to_diagnostics().is_empty());
    }

    #[test]
    fn test_code_action_params_filters_context() {
        let range = Range::new(Position::new(1, 0), Position::new(1, 3));
        let anchor = AnchorElement::new("foo", TextSpan::new(10, 13).unwrap(), range, 1, "/a.rs");
        let diagnostics = vec![
            Diagnostic::new(range, Some(DiagnosticSeverity::Warning), "unknown function")
                .with_source("ls"),
            Diagnostic::new(
                Range::new(Position::new(5, 0), Position::new(5, 2)),
                Some(DiagnosticSeverity::Error),
                "elsewhere",
            ),
        ];

        let params = code_action_params("file:///a.rs", &anchor, &diagnostics);
        assert_eq!(params["textDocument"]["uri"], "file:///a.rs");
        assert_eq!(params["range"]["start"]["line"], 1);
        assert_eq!(params["range"]["end"]["character"], 3);
        let context = params["context"]["diagnostics"].as_array().unwrap();
        assert_eq!(context.len(), 1);
        assert_eq!(context[0]["message"], "unknown function");
        assert_eq!(context[0]["severity"], 2);
        assert_eq!(context[0]["source"], "ls");
        assert!(context[0].get("code").is_none());
    }

    #[test]
    fn test_parse_code_action_response_null() {
        let parsed = parse_code_action_response(serde_json::Value::Null).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_code_action_response_mixed_with_nulls() {
        let parsed = parse_code_action_response(serde_json::json!([
            { "title": "Fix", "kind": "quickfix", "edit": { "changes": {} } },
            null,
            { "title": "Run", "command": "x.run" }
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(matches!(parsed[0], Some(CodeActionOrCommand::CodeAction(_))));
        assert!(parsed[1].is_none());
        assert!(matches!(parsed[2], Some(CodeActionOrCommand::Command(_))));
    }

    #[test]
    fn test_parse_code_action_response_rejects_garbage() {
        assert!(parse_code_action_response(serde_json::json!({ "oops": true })).is_err());
        assert!(parse_code_action_response(serde_json::json!([42])).is_err());
    }

    #[test]
    #[cfg(not(windows))]
    fn test_uri_matches_session_keys() {
        let uri = path_to_file_uri(Path::new("/src/main.rs")).unwrap();
        assert_eq!(uri.as_str(), "file:///src/main.rs");

        let spaced = path_to_file_uri(Path::new("/src/my file.rs")).unwrap();
        assert_eq!(spaced.as_str(), "file:///src/my%20file.rs");
        assert_eq!(
            file_uri_to_path(spaced.as_str()),
            Some(PathBuf::from("/src/my file.rs"))
        );
    }

    #[test]
    fn test_relative_path_error_names_the_path() {
        let err = path_to_file_uri(Path::new("src/main.rs")).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert path to file URI: src/main.rs");
    }

    #[test]
    fn test_only_file_uris_map_to_paths() {
        assert!(file_uri_to_path("untitled:Untitled-1").is_none());
        assert!(file_uri_to_path("https://example.com/test.rs").is_none());
    }
}
