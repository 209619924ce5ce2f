//! Preference store for folder bookmarks
//!
//! The folder collection writes its full ordered sequence through a
//! [`PreferenceStore`] on every change. Each write carries a [`ChangeToken`]
//! issued by the store; change notifications report the token of the write
//! that caused them, so a writer can recognise (and skip) its own changes.
//!
//! # Backends
//!
//! - [`SledStore`]: durable store on top of sled, with change notifications
//!   via [`PrefWatcher`] and the access grant tree
//! - [`MemoryStore`]: in-process store with failure injection

use bincode::{Decode, Encode};

use crate::folders::FolderEntry;

pub mod error;
pub mod memory;
pub mod sled_store;

pub use error::PrefsError;
pub use memory::MemoryStore;
pub use sled_store::{PrefWatcher, SledStore};

/// Token identifying one write to the store
#[derive(Encode, Decode, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChangeToken(pub u64);

/// Keys the store emits change notifications for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// The ordered folder bookmark sequence
    Folders,
}

impl PrefKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Folders => "FOLDERS",
        }
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            b"FOLDERS" => Some(Self::Folders),
            _ => None,
        }
    }
}

/// A change notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefChange {
    pub key: PrefKey,

    /// Token of the write that caused the change (None if unknown, e.g. a removal)
    pub origin: Option<ChangeToken>,
}

/// Durable storage for the folder bookmark sequence
pub trait PreferenceStore: Send {
    /// Issue a fresh token for the next write
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if the store cannot allocate an id.
    fn next_token(&self) -> Result<ChangeToken, PrefsError>;

    /// Read the stored sequence (empty if nothing was stored yet)
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if reading or decoding fails.
    fn load_folders(&self) -> Result<Vec<FolderEntry>, PrefsError>;

    /// Replace the stored sequence; returns only once the write is durable
    ///
    /// # Errors
    ///
    /// Returns `PrefsError` if encoding, writing or flushing fails.
    fn store_folders(&self, entries: &[FolderEntry], origin: ChangeToken) -> Result<(), PrefsError>;
}
