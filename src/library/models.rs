//! Item and container models
//!
//! Containers carry a variant tag instead of being inspected by type: the
//! [`Capabilities`] of a container are resolved once when it is bound to the
//! browse view.

use std::fmt;

use crate::folders::{FOLDER_ID_PREFIX, FolderEntry, LocationRef};

/// Display name of the root folder collection
pub const ROOT_NAME: &str = "Folders";

/// Stable identifier of a library item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an item can be played or expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Playable,
    Browsable,
}

/// A browsable or playable unit owned by the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,

    /// Storage location backing the item, when it has one
    pub location: Option<LocationRef>,
}

impl Item {
    #[must_use]
    pub fn playable(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            kind: ItemKind::Playable,
            location: None,
        }
    }

    #[must_use]
    pub fn browsable(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            kind: ItemKind::Browsable,
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: LocationRef) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.kind == ItemKind::Playable
    }

    #[must_use]
    pub fn is_browsable(&self) -> bool {
        self.kind == ItemKind::Browsable
    }
}

impl From<&FolderEntry> for Item {
    fn from(entry: &FolderEntry) -> Self {
        Self::browsable(
            format!("{FOLDER_ID_PREFIX}{}", entry.location),
            entry.name.clone(),
        )
        .with_location(entry.location.clone())
    }
}

/// What the browse view may do with a bound container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Rows can be dragged and swipe-dismissed, with edits written back
    pub supports_reorder: bool,

    /// New entries can be added and persisted
    pub supports_persistent_add: bool,
}

impl Capabilities {
    pub const ROOT: Self = Self {
        supports_reorder: true,
        supports_persistent_add: true,
    };

    pub const READ_ONLY: Self = Self {
        supports_reorder: false,
        supports_persistent_add: false,
    };
}

/// A browsable container that can be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// The root folder collection
    Root,

    /// Any other browsable item (a bookmarked folder, a subfolder, ...)
    Folder(Item),
}

impl Container {
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            Self::Root => Capabilities::ROOT,
            Self::Folder(_) => Capabilities::READ_ONLY,
        }
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Root => ROOT_NAME,
            Self::Folder(item) => &item.name,
        }
    }
}
