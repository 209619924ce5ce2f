//! Preference store error types

use thiserror::Error;

/// Preference store errors
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Represents a sled database error
    #[error("Store error: {0}")]
    Sled(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// The store refused the write
    #[error("Write rejected: {0}")]
    WriteRejected(String),
}
