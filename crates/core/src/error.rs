//! Entity error model.

use thiserror::Error;

/// Result type used when reconstructing entities from records.
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to reconstruct an entity from a serialized record.
///
/// Only reconstruction can fail. Fresh construction, serialization and display
/// are infallible; persistence failures belong to the storage collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A timestamp field held a string that is not ISO-8601.
    #[error("invalid timestamp for `{field}`: {value:?} ({reason})")]
    InvalidTimestamp {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field was absent from the record.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field had the wrong JSON type (e.g. a non-string id or timestamp).
    #[error("invalid field `{field}`: expected {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// `created_at` was later than `updated_at`.
    #[error("`created_at` ({created_at}) is later than `updated_at` ({updated_at})")]
    TimestampOrder {
        created_at: String,
        updated_at: String,
    },

    /// The type tag was missing or not a string.
    #[error("missing type tag `__class__`")]
    MissingTypeTag,

    /// No constructor is registered for the type tag.
    #[error("unknown entity type: {0}")]
    UnknownType(String),
}

impl ParseError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidField {
            field: field.into(),
            expected,
        }
    }
}

/// Rejected write to an entity's attribute bag.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// Reserved keys (`id`, timestamps, type tag) are managed by the entity itself.
    #[error("`{0}` is reserved and cannot be assigned as an attribute")]
    Reserved(String),

    /// The key is stored in a typed field of the concrete entity type.
    #[error("`{key}` is a typed field of {entity_type}; assign the field instead")]
    Typed {
        entity_type: &'static str,
        key: String,
    },

    /// A numeric field must hold a finite value to be serialized.
    #[error("`{0}` must be a finite number")]
    NonFinite(String),
}
