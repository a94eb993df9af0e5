//! Domain types for LSP-backed inspections.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Server coordinates ([`Position`], [`Range`]) and editor coordinates
//! ([`TextSpan`]) are distinct types so they cannot be mixed up.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod diagnostic;
mod position;
mod problem;
mod remedy;

pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use position::{Position, Range, TextSpan};
pub use problem::{AnchorElement, HighlightCategory, ProblemRecord};
pub use remedy::{CodeAction, CodeActionOrCommand, Command, Remedy, TextEdit, WorkspaceEdit};
