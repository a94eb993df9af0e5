//! Maps language-server diagnostics onto editor problems.
//!
//! Diagnostics arrive asynchronously, addressed by line and UTF-16 column;
//! the editor wants char-offset spans with quick fixes attached. A pass takes
//! a snapshot of one document's diagnostics, maps each onto the current text,
//! resolves fixes through the session, and returns the problems to render.

pub mod config;
pub mod protocol;

mod builder;
mod diagnostics;
mod fixes;
mod inspection;
mod manager;
mod position;
mod session;
mod severity;

#[cfg(test)]
mod test_support;

pub use builder::{InspectError, build_problems};
pub use diagnostics::{DiagnosticsSnapshot, DiagnosticsStore, SnapshotError};
pub use fixes::{Remedies, partition_remedies, resolve_remedies};
pub use inspection::{
    GROUP_DISPLAY_NAME, INSPECTION_ID, Inspection, LspInspection, SHORT_NAME, STATIC_DESCRIPTION,
};
pub use manager::{LspEvent, LspManager};
pub use position::DocumentSnapshot;
pub use session::{
    CodeActionResponse, ConstructionError, DefaultProblemFactory, EditorSession, ProblemFactory,
    SessionRegistry,
};
pub use severity::classify;
