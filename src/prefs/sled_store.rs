//! Sled-backed preference store
//!
//! Uses two sled trees:
//! - `prefs`: `FOLDERS` -> bincode `{ origin, entries }`
//! - `grants`: location -> unix time the access grant was recorded
//!
//! The write token is stored alongside the sequence so that [`PrefWatcher`]
//! can report which write produced each change, including writes made by
//! other processes sharing the store.

use bincode::{Decode, Encode};
use chrono::Utc;
use sled::{Db, Subscriber, Tree};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ChangeToken, PrefChange, PrefKey, PreferenceStore, PrefsError};
use crate::acquire::GrantStore;
use crate::folders::{FolderEntry, FolderError, LocationRef};

#[derive(Encode, Decode)]
struct StoredFolders {
    origin: u64,
    entries: Vec<FolderEntry>,
}

/// Preference and access grant store on top of sled
///
/// Cloning is cheap; clones share the same underlying database.
#[derive(Clone)]
pub struct SledStore {
    db: Db,
    prefs: Tree,
    grants: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the database or its trees cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PrefsError> {
        let db = sled::open(path)?;
        let prefs = db.open_tree("prefs")?;
        let grants = db.open_tree("grants")?;
        Ok(Self { db, prefs, grants })
    }

    /// Subscribe to changes of the folder sequence
    #[must_use]
    pub fn watch(&self) -> PrefWatcher {
        PrefWatcher {
            subscriber: self.prefs.watch_prefix(PrefKey::Folders.as_str()),
        }
    }

    /// When an access grant was recorded for `location` (unix seconds)
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the lookup or decoding fails.
    pub fn granted_at(&self, location: &LocationRef) -> Result<Option<i64>, PrefsError> {
        match self.grants.get(location.as_str())? {
            Some(value) => {
                let (at, _): (i64, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(Some(at))
            }
            None => Ok(None),
        }
    }
}

impl PreferenceStore for SledStore {
    fn next_token(&self) -> Result<ChangeToken, PrefsError> {
        Ok(ChangeToken(self.db.generate_id()?))
    }

    fn load_folders(&self) -> Result<Vec<FolderEntry>, PrefsError> {
        match self.prefs.get(PrefKey::Folders.as_str())? {
            Some(value) => {
                let (stored, _): (StoredFolders, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(stored.entries)
            }
            None => Ok(Vec::new()),
        }
    }

    fn store_folders(&self, entries: &[FolderEntry], origin: ChangeToken) -> Result<(), PrefsError> {
        let stored = StoredFolders {
            origin: origin.0,
            entries: entries.to_vec(),
        };
        let value = bincode::encode_to_vec(&stored, bincode::config::standard())?;

        self.prefs.insert(PrefKey::Folders.as_str(), value)?;
        self.prefs.flush()?;
        Ok(())
    }
}

impl GrantStore for SledStore {
    fn persist_access_grant(&mut self, location: &LocationRef) -> Result<(), FolderError> {
        if let Err(e) = std::fs::read_dir(location.as_path()) {
            return Err(FolderError::GrantDenied {
                location: location.clone(),
                reason: e.to_string(),
            });
        }

        let value = bincode::encode_to_vec(Utc::now().timestamp(), bincode::config::standard())
            .map_err(PrefsError::from)?;
        self.grants
            .insert(location.as_str(), value)
            .map_err(PrefsError::from)?;
        self.grants.flush().map_err(PrefsError::from)?;

        debug!(%location, "recorded access grant");
        Ok(())
    }
}

/// Change notifications for the folder sequence of a [`SledStore`]
pub struct PrefWatcher {
    subscriber: Subscriber,
}

impl PrefWatcher {
    /// Wait up to `wait` for the first change, then collect whatever else is pending
    pub fn poll_for(&mut self, wait: Duration) -> Vec<PrefChange> {
        let mut changes = Vec::new();
        let mut timeout = wait;

        while let Ok(event) = self.subscriber.next_timeout(timeout) {
            timeout = Duration::ZERO;
            if let Some(change) = Self::to_change(&event) {
                changes.push(change);
            }
        }

        changes
    }

    fn to_change(event: &sled::Event) -> Option<PrefChange> {
        match event {
            sled::Event::Insert { key, value } => {
                let key = PrefKey::from_bytes(key)?;
                let origin = match bincode::decode_from_slice::<StoredFolders, _>(
                    value,
                    bincode::config::standard(),
                ) {
                    Ok((stored, _)) => Some(ChangeToken(stored.origin)),
                    Err(e) => {
                        warn!(error = %e, "undecodable folder change notification");
                        None
                    }
                };
                Some(PrefChange { key, origin })
            }
            sled::Event::Remove { key } => Some(PrefChange {
                key: PrefKey::from_bytes(key)?,
                origin: None,
            }),
        }
    }
}
