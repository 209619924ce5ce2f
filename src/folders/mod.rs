//! Root folder collection
//!
//! Holds the ordered set of folder bookmarks and writes the full sequence
//! through to a [`PreferenceStore`] on every structural change.
//!
//! The in-memory sequence is an immutable snapshot (`Arc<[FolderEntry]>`).
//! Mutations build the next sequence on the side, persist it, and only then
//! swap it in, so readers never observe a half-applied edit and a failed write
//! never leaves memory ahead of storage.

use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::library::{Item, ItemId};
use crate::prefs::{ChangeToken, PrefChange, PrefKey, PreferenceStore};

pub mod error;
pub mod types;

pub use error::FolderError;
pub use types::{FolderEntry, LocationRef};

/// Prefix of item ids that name a folder bookmark
pub const FOLDER_ID_PREFIX: &str = "folder:";

/// Upper bound on remembered write tokens awaiting their change notification
const MAX_PENDING_TOKENS: usize = 64;

/// The root container of user folder bookmarks
pub struct FolderCollection {
    store: Box<dyn PreferenceStore>,
    entries: Arc<[FolderEntry]>,
    own_writes: VecDeque<ChangeToken>,
}

impl FolderCollection {
    /// Load the persisted bookmark sequence from `store`
    ///
    /// # Errors
    ///
    /// Returns `FolderError::PersistenceFailure` if the stored sequence cannot be read.
    pub fn load(store: Box<dyn PreferenceStore>) -> Result<Self, FolderError> {
        let entries = store.load_folders()?;
        debug!(count = entries.len(), "loaded folder bookmarks");

        Ok(Self {
            store,
            entries: entries.into(),
            own_writes: VecDeque::new(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Immutable snapshot of the current sequence
    #[must_use]
    pub fn entries(&self) -> Arc<[FolderEntry]> {
        Arc::clone(&self.entries)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FolderEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn position(&self, location: &LocationRef) -> Option<usize> {
        self.entries.iter().position(|e| &e.location == location)
    }

    #[must_use]
    pub fn contains(&self, location: &LocationRef) -> bool {
        self.position(location).is_some()
    }

    /// Append a bookmark for `location`
    ///
    /// # Errors
    ///
    /// - `DuplicateEntry` if the location is already bookmarked
    /// - `PersistenceFailure` if the write-through fails (collection unchanged)
    pub fn add_entry(&mut self, location: LocationRef) -> Result<(), FolderError> {
        if self.contains(&location) {
            return Err(FolderError::DuplicateEntry(location));
        }

        let mut next = self.entries.to_vec();
        next.push(FolderEntry::new(location));
        self.commit(next)?;

        info!(location = %self.entries[self.entries.len() - 1].location, "added folder");
        Ok(())
    }

    /// Remove the bookmark at `index`, returning it
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if `index` is not a valid position
    /// - `PersistenceFailure` if the write-through fails (collection unchanged)
    pub fn remove_entry(&mut self, index: usize) -> Result<FolderEntry, FolderError> {
        self.check_index(index)?;

        let mut next = self.entries.to_vec();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(location = %removed.location, index, "removed folder");
        Ok(removed)
    }

    /// Move the bookmark at `from` to `to`, shifting the entries in between
    ///
    /// # Errors
    ///
    /// - `IndexOutOfRange` if either index is not a valid position
    /// - `PersistenceFailure` if the write-through fails (collection unchanged)
    pub fn move_entry(&mut self, from: usize, to: usize) -> Result<(), FolderError> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from == to {
            return Ok(());
        }

        let mut next = self.entries.to_vec();
        let entry = next.remove(from);
        next.insert(to, entry);
        self.commit(next)?;

        debug!(from, to, "moved folder");
        Ok(())
    }

    /// Materialize the bookmarks as browsable items
    #[must_use]
    pub fn list_entries(&self) -> Vec<Item> {
        self.entries.iter().map(Item::from).collect()
    }

    /// Whether `id` names one of this collection's bookmark items
    #[must_use]
    pub fn is_folder_item(&self, id: &ItemId) -> bool {
        id.as_str()
            .strip_prefix(FOLDER_ID_PREFIX)
            .is_some_and(|location| self.entries.iter().any(|e| e.location.as_str() == location))
    }

    /// Whether `change` was caused by one of this collection's own writes
    ///
    /// A matching token is consumed, so each write is acknowledged once.
    pub fn acknowledge(&mut self, change: &PrefChange) -> bool {
        if change.key != PrefKey::Folders {
            return false;
        }

        let Some(origin) = change.origin else {
            return false;
        };

        match self.own_writes.iter().position(|t| *t == origin) {
            Some(pos) => {
                self.own_writes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Re-read the sequence from storage, returning whether it changed
    ///
    /// # Errors
    ///
    /// Returns `PersistenceFailure` if the store cannot be read.
    pub fn reload(&mut self) -> Result<bool, FolderError> {
        let stored = self.store.load_folders()?;
        if stored.as_slice() == &*self.entries {
            return Ok(false);
        }

        debug!(count = stored.len(), "folder bookmarks changed externally");
        self.entries = stored.into();
        Ok(true)
    }

    fn check_index(&self, index: usize) -> Result<(), FolderError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(FolderError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    fn commit(&mut self, next: Vec<FolderEntry>) -> Result<(), FolderError> {
        let token = self.store.next_token()?;

        // Registered before the write: the notification may arrive before it returns.
        if self.own_writes.len() == MAX_PENDING_TOKENS {
            self.own_writes.pop_front();
        }
        self.own_writes.push_back(token);

        if let Err(e) = self.store.store_folders(&next, token) {
            self.own_writes.retain(|t| *t != token);
            warn!(error = %e, "failed to persist folder bookmarks");
            return Err(e.into());
        }

        self.entries = next.into();
        Ok(())
    }
}

impl std::fmt::Debug for FolderCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderCollection")
            .field("entries", &self.entries)
            .field("own_writes", &self.own_writes)
            .finish_non_exhaustive()
    }
}
