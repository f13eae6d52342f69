//! Type-tag dispatch for heterogeneous collections.
//!
//! Storage loads records of many entity types at once. The `__class__` tag of
//! each record picks the constructor registered for that type.

use std::any::Any;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::entity::{CLASS_KEY, Entity, EntityBase, Record};
use crate::error::{ParseError, ParseResult};
use crate::id::EntityId;
use crate::timestamp::Timestamp;

/// Object-safe view over any [`Entity`].
///
/// Method names differ from [`Entity`] so both traits can be in scope without
/// ambiguity; `dyn AnyEntity` carries the familiar names as inherent methods.
pub trait AnyEntity: core::fmt::Debug {
    fn type_name(&self) -> &'static str;
    fn entity_base(&self) -> &EntityBase;
    fn to_record(&self) -> Record;
    fn describe(&self) -> String;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> AnyEntity for T
where
    T: Entity + core::fmt::Debug + 'static,
{
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn entity_base(&self) -> &EntityBase {
        self.base()
    }

    fn to_record(&self) -> Record {
        self.to_dict()
    }

    fn describe(&self) -> String {
        self.display_string()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn AnyEntity {
    pub fn id(&self) -> &EntityId {
        self.entity_base().id()
    }

    pub fn created_at(&self) -> Timestamp {
        self.entity_base().created_at()
    }

    pub fn updated_at(&self) -> Timestamp {
        self.entity_base().updated_at()
    }

    pub fn to_dict(&self) -> Record {
        self.to_record()
    }

    pub fn display_string(&self) -> String {
        self.describe()
    }

    pub fn is<T: Entity + 'static>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Entity + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Entity + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl core::fmt::Display for dyn AnyEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

type Constructor = fn(Record) -> ParseResult<Box<dyn AnyEntity>>;

fn construct<T>(record: Record) -> ParseResult<Box<dyn AnyEntity>>
where
    T: Entity + core::fmt::Debug + 'static,
{
    Ok(Box::new(T::from_dict(record)?))
}

/// Maps type tags to constructors.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `T::TYPE_NAME`. A second registration replaces the first.
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Entity + core::fmt::Debug + 'static,
    {
        if self
            .constructors
            .insert(T::TYPE_NAME, construct::<T>)
            .is_some()
        {
            tracing::warn!(entity_type = T::TYPE_NAME, "entity type registered twice");
        }
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Rebuild an entity of whatever type the record's `__class__` names.
    pub fn reconstruct(&self, record: Record) -> ParseResult<Box<dyn AnyEntity>> {
        let type_name = match record.get(CLASS_KEY) {
            Some(Value::String(name)) => name.as_str(),
            _ => return Err(ParseError::MissingTypeTag),
        };
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| ParseError::UnknownType(type_name.to_string()))?;
        constructor(record)
    }
}
