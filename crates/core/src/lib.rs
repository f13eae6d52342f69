//! `hbnb-core` — entity base for the persistence framework.
//!
//! Gives every record a unique id, creation/update timestamps, a diagnostic
//! representation, and conversion to and from a flat key/value [`Record`].
//! No I/O happens here: persistence is delegated to a [`Storage`] collaborator
//! passed in explicitly.

pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod registry;
pub mod storage;
pub mod timestamp;

pub use entity::{
    CLASS_KEY, CREATED_AT_KEY, Entity, EntityBase, ID_KEY, RESERVED_KEYS, Record, UPDATED_AT_KEY,
    is_reserved,
};
pub use error::{AttributeError, ParseError, ParseResult};
pub use id::EntityId;
pub use registry::{AnyEntity, Registry};
pub use storage::Storage;
pub use timestamp::Timestamp;
