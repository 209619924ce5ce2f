//! In-memory preference store
//!
//! Clones share the same state, so one handle can be given to a
//! `FolderCollection` while another inspects what was persisted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ChangeToken, PrefChange, PrefKey, PreferenceStore, PrefsError};
use crate::folders::FolderEntry;

/// Preference store kept in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    folders: Vec<FolderEntry>,
    last_token: u64,
    fail_writes: bool,
    writes: usize,
    changes: Vec<PrefChange>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `folders`
    #[must_use]
    pub fn with_folders(folders: Vec<FolderEntry>) -> Self {
        let store = Self::default();
        store.lock().folders = folders;
        store
    }

    /// Make every following write fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// The currently persisted sequence
    #[must_use]
    pub fn persisted(&self) -> Vec<FolderEntry> {
        self.lock().folders.clone()
    }

    /// Number of successful writes
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Take the change notifications emitted since the last call
    #[must_use]
    pub fn drain_changes(&self) -> Vec<PrefChange> {
        std::mem::take(&mut self.lock().changes)
    }

    /// Replace the sequence as another writer would, with a token nobody holds
    pub fn write_foreign(&self, folders: Vec<FolderEntry>) {
        let mut inner = self.lock();
        inner.last_token += 1;
        let origin = ChangeToken(inner.last_token);
        inner.folders = folders;
        inner.changes.push(PrefChange {
            key: PrefKey::Folders,
            origin: Some(origin),
        });
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryStore {
    fn next_token(&self) -> Result<ChangeToken, PrefsError> {
        let mut inner = self.lock();
        inner.last_token += 1;
        Ok(ChangeToken(inner.last_token))
    }

    fn load_folders(&self) -> Result<Vec<FolderEntry>, PrefsError> {
        Ok(self.persisted())
    }

    fn store_folders(&self, entries: &[FolderEntry], origin: ChangeToken) -> Result<(), PrefsError> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(PrefsError::WriteRejected("memory store is failing writes".into()));
        }

        inner.folders = entries.to_vec();
        inner.writes += 1;
        inner.changes.push(PrefChange {
            key: PrefKey::Folders,
            origin: Some(origin),
        });
        Ok(())
    }
}
