//! Storage collaborator boundary.
//!
//! The entity never reaches storage through global state: fresh construction
//! and `save` take the collaborator explicitly.

use crate::entity::Record;

/// Tracks entities and persists them.
///
/// Records handed over are snapshots produced by `Entity::to_dict`, so they
/// always carry `id` and the `__class__` type tag.
pub trait Storage {
    type Error: core::fmt::Debug;

    /// Register a freshly created entity. Called exactly once per entity,
    /// and only on fresh construction.
    fn new(&mut self, record: Record);

    /// Take the current snapshot of a saved entity, then persist every tracked
    /// record. Batching and durability are up to the implementation.
    fn save(&mut self, record: Record) -> Result<(), Self::Error>;
}
