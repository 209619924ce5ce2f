//! Testing utilities for foldr
//!
//! This module provides a temporary sled store and recording fakes for the
//! library, host, picker and grant collaborators.
//!
//! Only available when compiled with `cfg(test)`.

use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

use crate::acquire::{AcquisitionTicket, GrantStore, PickerSurface};
use crate::browse::Host;
use crate::folders::{FolderCollection, FolderEntry, FolderError, LocationRef};
use crate::library::{Favorites, Item, Library, LibraryError, Playlists};
use crate::prefs::{MemoryStore, SledStore};

/// Wrapper for a temporary sled store that is removed on drop
pub struct TestStore {
    // Declared first so the store closes before the directory is removed
    store: SledStore,
    dir: TempDir,
}

impl TestStore {
    /// Open a fresh store in a new temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the store cannot be created.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SledStore::open(dir.path().join("store")).expect("Failed to open test store");
        Self { store, dir }
    }

    #[must_use]
    pub const fn store(&self) -> &SledStore {
        &self.store
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn folder_location(path: &str) -> LocationRef {
    LocationRef::new(path)
}

pub fn playable(name: &str) -> Item {
    Item::playable(format!("track:{name}"), name)
}

/// Folder collection over a memory store seeded with `locations`
pub fn memory_folders(locations: &[&str]) -> (FolderCollection, MemoryStore) {
    let store = MemoryStore::with_folders(
        locations
            .iter()
            .map(|l| FolderEntry::new(LocationRef::new(*l)))
            .collect(),
    );
    let folders =
        FolderCollection::load(Box::new(store.clone())).expect("memory store always loads");
    (folders, store)
}

#[derive(Debug, Default)]
pub struct RecordingFavorites {
    pub added: Vec<Vec<Item>>,
}

impl Favorites for RecordingFavorites {
    fn add_items(&mut self, items: Vec<Item>) {
        self.added.push(items);
    }
}

#[derive(Debug, Default)]
pub struct RecordingPlaylists {
    pub created: Vec<(String, Vec<Item>)>,
    pub appended: Vec<(String, Vec<Item>)>,
    /// Reject every update
    pub fail: bool,
}

impl RecordingPlaylists {
    fn check(&self, name: &str) -> Result<(), LibraryError> {
        if self.fail {
            return Err(LibraryError::Playlist(format!("cannot update {name}")));
        }
        Ok(())
    }
}

impl Playlists for RecordingPlaylists {
    fn create_playlist(&mut self, name: &str, items: Vec<Item>) -> Result<(), LibraryError> {
        self.check(name)?;
        self.created.push((name.to_string(), items));
        Ok(())
    }

    fn add_to_playlist(&mut self, name: &str, items: Vec<Item>) -> Result<(), LibraryError> {
        self.check(name)?;
        self.appended.push((name.to_string(), items));
        Ok(())
    }
}

/// Library over a memory store with fixed folder contents
pub struct FakeLibrary {
    pub folders: FolderCollection,
    pub store: MemoryStore,
    pub children: HashMap<LocationRef, Vec<Item>>,
    pub favorites: RecordingFavorites,
    pub playlists: RecordingPlaylists,
}

impl FakeLibrary {
    pub fn new(roots: &[&str]) -> Self {
        let (folders, store) = memory_folders(roots);
        Self {
            folders,
            store,
            children: HashMap::new(),
            favorites: RecordingFavorites::default(),
            playlists: RecordingPlaylists::default(),
        }
    }

    pub fn set_children(&mut self, location: &str, items: Vec<Item>) {
        self.children.insert(LocationRef::new(location), items);
    }
}

impl Library for FakeLibrary {
    fn folders(&self) -> &FolderCollection {
        &self.folders
    }

    fn folders_mut(&mut self) -> &mut FolderCollection {
        &mut self.folders
    }

    fn children(&self, folder: &Item) -> Result<Vec<Item>, LibraryError> {
        let location = folder
            .location
            .as_ref()
            .ok_or_else(|| LibraryError::NotBrowsable(folder.id.clone()))?;
        Ok(self.children.get(location).cloned().unwrap_or_default())
    }

    fn favorites(&mut self) -> &mut dyn Favorites {
        &mut self.favorites
    }

    fn playlists(&mut self) -> &mut dyn Playlists {
        &mut self.playlists
    }
}

/// Picker surface recording every launch
#[derive(Debug)]
pub struct FakePickers {
    pub restricted: bool,
    pub native_available: bool,
    pub native_error: Option<fn() -> FolderError>,
    pub native_attempts: usize,
    pub native_launches: Vec<AcquisitionTicket>,
    pub in_app_launches: Vec<AcquisitionTicket>,
}

impl Default for FakePickers {
    fn default() -> Self {
        Self {
            restricted: false,
            native_available: true,
            native_error: None,
            native_attempts: 0,
            native_launches: Vec::new(),
            in_app_launches: Vec::new(),
        }
    }
}

impl FakePickers {
    pub fn unavailable() -> Self {
        Self {
            native_available: false,
            ..Self::default()
        }
    }

    pub fn restricted() -> Self {
        Self {
            restricted: true,
            ..Self::default()
        }
    }
}

impl PickerSurface for FakePickers {
    fn is_restricted(&self) -> bool {
        self.restricted
    }

    fn launch_native_picker(&mut self, ticket: AcquisitionTicket) -> Result<(), FolderError> {
        self.native_attempts += 1;
        if let Some(error) = self.native_error {
            return Err(error());
        }
        if !self.native_available {
            return Err(FolderError::LaunchUnavailable("no document picker".into()));
        }
        self.native_launches.push(ticket);
        Ok(())
    }

    fn launch_in_app_picker(&mut self, ticket: AcquisitionTicket) {
        self.in_app_launches.push(ticket);
    }
}

/// Grant store recording grants, optionally denying all of them
#[derive(Debug, Default)]
pub struct FakeGrants {
    pub granted: Vec<LocationRef>,
    pub deny: bool,
}

impl FakeGrants {
    pub fn denying() -> Self {
        Self {
            granted: Vec::new(),
            deny: true,
        }
    }
}

impl GrantStore for FakeGrants {
    fn persist_access_grant(&mut self, location: &LocationRef) -> Result<(), FolderError> {
        if self.deny {
            return Err(FolderError::GrantDenied {
                location: location.clone(),
                reason: "denied by test".into(),
            });
        }
        self.granted.push(location.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub pickers: FakePickers,
    pub grants: FakeGrants,
    pub favorites_refreshes: usize,
    pub folders_shown: usize,
}

impl Host for FakeHost {
    fn pickers(&mut self) -> &mut dyn PickerSurface {
        &mut self.pickers
    }

    fn grants(&mut self) -> &mut dyn GrantStore {
        &mut self.grants
    }

    fn refresh_favorites_view(&mut self) {
        self.favorites_refreshes += 1;
    }

    fn show_folders_view(&mut self) {
        self.folders_shown += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PreferenceStore;

    #[test]
    fn test_store_basic() {
        let test_store = TestStore::new();

        assert!(test_store.store().load_folders().unwrap().is_empty());
        assert!(test_store.dir().exists());
    }

    #[test]
    fn test_store_cleanup() {
        let path = {
            let test_store = TestStore::new();
            test_store.dir().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_fake_library_children() {
        let mut library = FakeLibrary::new(&["/music"]);
        library.set_children("/music", vec![playable("a")]);

        let root = library.folders().list_entries();
        assert_eq!(library.children(&root[0]).unwrap().len(), 1);
        assert!(library.children(&playable("a")).is_err());
    }
}
