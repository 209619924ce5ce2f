//! Folder bookmark error types
//!
//! Covers both the collection contract and the acquisition flow:
//!
//! - **`DuplicateEntry`** / **`IndexOutOfRange`**: caller contract violations
//! - **`PersistenceFailure`**: the write-through to the preference store failed;
//!   the in-memory sequence was left untouched
//! - **`LaunchUnavailable`**: the native picker could not be shown (recovered
//!   inside the acquisition flow, never surfaced from it)
//! - **`GrantDenied`**: a long-lived access grant could not be recorded

use super::types::LocationRef;
use crate::prefs::PrefsError;
use thiserror::Error;

/// Folder collection and acquisition errors
#[derive(Debug, Error)]
pub enum FolderError {
    /// Location is already bookmarked
    #[error("Folder already added: {0}")]
    DuplicateEntry(LocationRef),

    /// Index does not address an entry
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Write-through to durable storage failed
    #[error("Failed to persist folders: {0}")]
    PersistenceFailure(#[from] PrefsError),

    /// Native location picker is not available in this context
    #[error("Location picker unavailable: {0}")]
    LaunchUnavailable(String),

    /// Access to the location could not be granted
    #[error("Access denied for {location}: {reason}")]
    GrantDenied { location: LocationRef, reason: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
