//! Media library collaborators
//!
//! The library resolves containers into items and owns the root
//! [`FolderCollection`]. Favorites and playlists are separate subsystems
//! reached through it.

use thiserror::Error;

use crate::folders::FolderCollection;

pub mod models;

pub use models::{Capabilities, Container, Item, ItemId, ItemKind, ROOT_NAME};

/// Library collaborator errors
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Item cannot be expanded into children
    #[error("Not a browsable item: {0}")]
    NotBrowsable(ItemId),

    /// The backing location could not be listed
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// Playlist subsystem failure
    #[error("Playlist error: {0}")]
    Playlist(String),
}

/// Favorites subsystem
pub trait Favorites {
    /// Append playable items to the favorites
    fn add_items(&mut self, items: Vec<Item>);
}

/// Playlist subsystem
pub trait Playlists {
    /// Create a new playlist holding `items`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Playlist` if the playlist cannot be created.
    fn create_playlist(&mut self, name: &str, items: Vec<Item>) -> Result<(), LibraryError>;

    /// Append `items` to the existing playlist `name`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Playlist` if the playlist does not exist or cannot be updated.
    fn add_to_playlist(&mut self, name: &str, items: Vec<Item>) -> Result<(), LibraryError>;
}

/// The media library service
pub trait Library {
    fn folders(&self) -> &FolderCollection;

    fn folders_mut(&mut self) -> &mut FolderCollection;

    /// Expand a browsable item into its ordered children
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if the item is not browsable or its location is unavailable.
    fn children(&self, folder: &Item) -> Result<Vec<Item>, LibraryError>;

    fn favorites(&mut self) -> &mut dyn Favorites;

    fn playlists(&mut self) -> &mut dyn Playlists;

    /// Rows displayed for `container`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if a nested container cannot be expanded.
    fn list_children(&self, container: &Container) -> Result<Vec<Item>, LibraryError> {
        match container {
            Container::Root => Ok(self.folders().list_entries()),
            Container::Folder(item) => self.children(item),
        }
    }
}
