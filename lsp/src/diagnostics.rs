//! Diagnostics store: the live per-URI diagnostics, and snapshots of it.
//!
//! The session manager writes as servers publish; inspections read from
//! another thread. Each URI's list is an `Arc<[Diagnostic]>` that writers
//! replace wholesale, so a reader's snapshot never changes under it. Every
//! write bumps the URI's generation so a reader can tell its snapshot is stale.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use lspi_types::Diagnostic;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// A writer panicked mid-update; the collection can't be trusted.
    #[error("diagnostics for {uri} are unreadable: a writer panicked mid-update")]
    Poisoned { uri: String },
    #[error("diagnostics for {uri} changed during the pass (generation {expected} -> {found})")]
    Mutated {
        uri: String,
        expected: u64,
        found: u64,
    },
}

#[derive(Debug, Clone, Default)]
struct Entry {
    items: Arc<[Diagnostic]>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct DiagnosticsStore {
    data: RwLock<HashMap<String, Entry>>,
}

impl DiagnosticsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the diagnostics for `uri`, as `textDocument/publishDiagnostics` does.
    pub fn publish(&self, uri: &str, items: Vec<Diagnostic>) {
        self.write(uri, |_| items.into());
    }

    /// Add one diagnostic to the end of `uri`'s list.
    pub fn append(&self, uri: &str, item: Diagnostic) {
        self.write(uri, |current| {
            let mut items = current.to_vec();
            items.push(item);
            items.into()
        });
    }

    pub fn clear(&self, uri: &str) {
        self.write(uri, |_| Arc::from([]));
    }

    /// Drop everything known about `uri`, e.g. when its document closes.
    pub fn forget(&self, uri: &str) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        data.remove(uri);
    }

    /// Point-in-time copy of `uri`'s diagnostics. Unknown URIs have none.
    pub fn snapshot(&self, uri: &str) -> Result<DiagnosticsSnapshot, SnapshotError> {
        let data = self.data.read().map_err(|_| SnapshotError::Poisoned {
            uri: uri.to_string(),
        })?;
        let entry = data.get(uri).cloned().unwrap_or_default();
        Ok(DiagnosticsSnapshot {
            uri: uri.to_string(),
            items: entry.items,
            generation: entry.generation,
        })
    }

    pub fn generation(&self, uri: &str) -> Result<u64, SnapshotError> {
        let data = self.data.read().map_err(|_| SnapshotError::Poisoned {
            uri: uri.to_string(),
        })?;
        Ok(data.get(uri).map_or(0, |entry| entry.generation))
    }

    /// Apply one write. A completed write leaves the map consistent again,
    /// so it also lifts any poisoning left by an earlier panicked writer.
    fn write(&self, uri: &str, update: impl FnOnce(&[Diagnostic]) -> Arc<[Diagnostic]>) {
        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let entry = data.entry(uri.to_string()).or_default();
        entry.items = update(entry.items.as_ref());
        entry.generation += 1;
        drop(data);
        self.data.clear_poison();
    }
}

/// An immutable copy of one URI's diagnostics, taken at a known generation.
#[derive(Debug, Clone)]
pub struct DiagnosticsSnapshot {
    uri: String,
    items: Arc<[Diagnostic]>,
    generation: u64,
}

impl DiagnosticsSnapshot {
    /// A snapshot not backed by any store, for sessions that keep their own list.
    #[must_use]
    pub fn detached(uri: impl Into<String>, items: Vec<Diagnostic>) -> Self {
        Self {
            uri: uri.into(),
            items: items.into(),
            generation: 0,
        }
    }

    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[must_use]
    pub fn items(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fail if `store` has been written for this URI since the snapshot was taken.
    pub fn verify(&self, store: &DiagnosticsStore) -> Result<(), SnapshotError> {
        let found = store.generation(&self.uri)?;
        if found == self.generation {
            Ok(())
        } else {
            Err(SnapshotError::Mutated {
                uri: self.uri.clone(),
                expected: self.generation,
                found,
            })
        }
    }
}

impl<'a> IntoIterator for &'a DiagnosticsSnapshot {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
