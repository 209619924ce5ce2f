//! Foldr - user-curated folder bookmarks for a media library
//!
//! This library keeps the ordered set of root folder bookmarks, persists it
//! through a preference store, and drives the list model used to browse it:
//! row selection, drag/dismiss reordering, command routing and the two-path
//! flow for acquiring a new folder from the user.

use thiserror::Error;

pub mod acquire;
pub mod browse;
pub mod cli;
pub mod config;
pub mod folders;
pub mod library;
pub mod logging;
pub mod prefs;

#[cfg(test)]
pub mod testing;

pub use folders::{FolderCollection, FolderEntry, FolderError, LocationRef};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FoldrError {
    /// Folder collection or acquisition error
    #[error("Folder error: {0}")]
    Folder(#[from] folders::FolderError),
    /// Preference store error
    #[error("Preference store error: {0}")]
    Prefs(#[from] prefs::PrefsError),
    /// Library collaborator error
    #[error("Library error: {0}")]
    Library(#[from] library::LibraryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Logging could not be installed
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LoggingError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
