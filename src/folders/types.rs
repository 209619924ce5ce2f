//! Bookmark value types
//!
//! - **`LocationRef`**: opaque reference to a user-granted storage location
//!   (a filesystem path or a provider URI). Equality is plain string equality.
//! - **`FolderEntry`**: one bookmark in the root collection, the location plus
//!   the metadata shown for it.

use bincode::{Decode, Encode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Reference to a storage location granted by the user
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationRef(String);

impl LocationRef {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Build a location from a filesystem path
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().display().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// View the location as a filesystem path
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Last non-empty segment of the location, used as the default display name
    ///
    /// ```
    /// use foldr::LocationRef;
    ///
    /// assert_eq!(LocationRef::new("/home/me/Music/").display_name(), "Music");
    /// assert_eq!(LocationRef::new("content://tree/Podcasts").display_name(), "Podcasts");
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
            .to_string()
    }
}

impl fmt::Display for LocationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationRef {
    fn from(location: &str) -> Self {
        Self::new(location)
    }
}

/// A folder bookmark held by the root collection
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FolderEntry {
    pub location: LocationRef,

    /// Display name (defaults to the last location segment)
    pub name: String,

    /// Unix timestamp (seconds) of when the bookmark was added
    pub added_at: i64,
}

impl FolderEntry {
    /// Create an entry stamped with the current time
    #[must_use]
    pub fn new(location: LocationRef) -> Self {
        let name = location.display_name();
        Self {
            location,
            name,
            added_at: Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.added_at, 0)
    }
}
