//! Reference storage collaborator for `hbnb` entities.
//!
//! [`InMemoryStorage`] tracks records under `<Type>.<id>` keys, flushes them
//! into a persisted snapshot on every save, and rebuilds heterogeneous
//! collections from that snapshot through a type-tag [`Registry`].
//!
//! [`Registry`]: hbnb_core::Registry

mod error;
mod in_memory;


pub use error::{StorageError, StorageResult};
pub use in_memory::{InMemoryStorage, record_key};
