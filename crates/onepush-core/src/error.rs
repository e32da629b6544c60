//! Error types for OnePush Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The backing hash store could not be reached or rejected the command.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A value could not be serialized before writing.
    #[error("Encode error: {0}")]
    Encode(String),

    /// A stored value could not be deserialized into the expected type.
    #[error("Decode error in bucket '{bucket}' field '{field}': {reason}")]
    Decode {
        bucket: String,
        field: String,
        reason: String,
    },

    /// An owner token or field key cannot be used to build a bucket key.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(err.to_string())
    }

    /// Whether the failure came from the backing store rather than the data.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
