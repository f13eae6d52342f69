//! Error types for the storage layer.

use hbnb_core::ParseError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A record handed to storage lacked its `id` or `__class__`.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A persisted record could not be turned back into an entity.
    #[error("failed to reconstruct record `{key}`: {source}")]
    Parse {
        key: String,
        #[source]
        source: ParseError,
    },
}
