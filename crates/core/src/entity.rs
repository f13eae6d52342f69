//! Entity base: identity, timestamps and record conversion.
//!
//! Every entity owns an [`EntityBase`] and implements [`Entity`]. The trait
//! provides the whole lifecycle on top of four required methods:
//!
//! - **Fresh construction** (`create`): new id and timestamps, registered with
//!   the storage collaborator.
//! - **Reconstruction** (`from_dict`): adopt a stored record verbatim, parsing
//!   the two timestamps. Storage is not involved.
//! - **Serialization** (`to_dict`): a flat record with ISO-8601 timestamps and
//!   a `__class__` type tag.
//! - **Save** (`save`): bump `updated_at` and ask storage to persist.

use serde_json::Value;

use crate::error::{AttributeError, ParseError, ParseResult};
use crate::id::EntityId;
use crate::storage::Storage;
use crate::timestamp::{self, Timestamp};

/// Serialized entity: a flat mapping from field name to JSON value.
pub type Record = serde_json::Map<String, Value>;

pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";
/// Type tag naming the concrete entity type of a record.
pub const CLASS_KEY: &str = "__class__";

pub const RESERVED_KEYS: [&str; 4] = [ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY, CLASS_KEY];

pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// State shared by every entity.
///
/// `attributes` is the open-ended extension bag. It never holds a reserved key.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBase {
    id: EntityId,
    created_at: Timestamp,
    updated_at: Timestamp,
    attributes: Record,
}

impl EntityBase {
    /// New identity with `created_at == updated_at == now`.
    pub fn fresh() -> Self {
        let now = timestamp::now();
        Self {
            id: EntityId::new(),
            created_at: now,
            updated_at: now,
            attributes: Record::new(),
        }
    }

    /// Rebuild from a stored record.
    ///
    /// The type tag is dropped; every other non-reserved key lands in the
    /// attribute bag untouched.
    pub fn from_record(mut record: Record) -> ParseResult<Self> {
        record.remove(CLASS_KEY);

        let id = match record.remove(ID_KEY) {
            Some(Value::String(id)) => EntityId::from(id),
            Some(_) => return Err(ParseError::invalid(ID_KEY, "a string")),
            None => return Err(ParseError::missing(ID_KEY)),
        };
        let created_at = take_timestamp(&mut record, CREATED_AT_KEY)?;
        let updated_at = take_timestamp(&mut record, UPDATED_AT_KEY)?;

        if created_at > updated_at {
            return Err(ParseError::TimestampOrder {
                created_at: timestamp::format(&created_at),
                updated_at: timestamp::format(&updated_at),
            });
        }

        Ok(Self {
            id,
            created_at,
            updated_at,
            attributes: record,
        })
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Set an attribute in the bag, returning the previous value.
    ///
    /// Only reachable through [`Entity::set_attribute`], which also guards the
    /// keys a concrete type stores as typed fields.
    pub(crate) fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, AttributeError> {
        let key = key.into();
        if is_reserved(&key) {
            return Err(AttributeError::Reserved(key));
        }
        Ok(self.attributes.insert(key, value.into()))
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Move `updated_at` to now. A clock that stepped backwards leaves it as is.
    pub fn touch(&mut self) {
        let now = timestamp::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    fn write_record(&self, record: &mut Record) {
        for (key, value) in &self.attributes {
            record.insert(key.clone(), value.clone());
        }
        record.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        record.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.created_at)),
        );
        record.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&self.updated_at)),
        );
    }
}

fn take_timestamp(record: &mut Record, field: &str) -> ParseResult<Timestamp> {
    match record.remove(field) {
        Some(Value::String(text)) => timestamp::parse(field, &text),
        Some(_) => Err(ParseError::invalid(field, "an ISO-8601 string")),
        None => Err(ParseError::missing(field)),
    }
}

/// A concrete entity type.
///
/// Implementors supply the type tag, access to their [`EntityBase`], and
/// optionally typed fields through `read_fields`/`write_fields`. Anything a
/// type does not claim stays in the attribute bag.
pub trait Entity: Sized {
    /// Type tag written under `__class__`.
    const TYPE_NAME: &'static str;

    /// Record keys owned by typed fields; the attribute bag never holds them.
    const TYPED_KEYS: &'static [&'static str] = &[];

    /// Wrap a base with default values for every typed field.
    fn from_base(base: EntityBase) -> Self;

    fn base(&self) -> &EntityBase;

    fn base_mut(&mut self) -> &mut EntityBase;

    /// Claim typed fields from a reconstructed record, removing the keys taken.
    fn read_fields(&mut self, fields: &mut Record) -> ParseResult<()> {
        let _ = fields;
        Ok(())
    }

    /// Write typed fields into an outgoing record.
    fn write_fields(&self, record: &mut Record) {
        let _ = record;
    }

    /// Fresh construction: new identity, registered with `storage`.
    fn create<S>(storage: &mut S) -> Self
    where
        S: Storage + ?Sized,
    {
        let entity = Self::from_base(EntityBase::fresh());
        tracing::debug!(
            entity_type = Self::TYPE_NAME,
            id = %entity.id(),
            "entity created"
        );
        storage.new(entity.to_dict());
        entity
    }

    /// Reconstruction from a record produced by `to_dict`.
    fn from_dict(record: Record) -> ParseResult<Self> {
        let mut base = EntityBase::from_record(record)?;
        let mut fields = std::mem::take(&mut base.attributes);

        let mut entity = Self::from_base(base);
        entity.read_fields(&mut fields)?;
        entity.base_mut().attributes = fields;

        tracing::debug!(
            entity_type = Self::TYPE_NAME,
            id = %entity.id(),
            "entity reconstructed"
        );
        Ok(entity)
    }

    /// Single entry point choosing the mode from the presence of fields.
    ///
    /// `None` and an empty record both mean fresh construction.
    fn construct<S>(storage: &mut S, fields: Option<Record>) -> ParseResult<Self>
    where
        S: Storage + ?Sized,
    {
        match fields {
            Some(record) if !record.is_empty() => Self::from_dict(record),
            _ => Ok(Self::create(storage)),
        }
    }

    /// Serialize into a new record, tagged with `TYPE_NAME`.
    fn to_dict(&self) -> Record {
        let mut record = Record::new();
        self.base().write_record(&mut record);
        self.write_fields(&mut record);
        record.insert(
            CLASS_KEY.to_string(),
            Value::String(Self::TYPE_NAME.to_string()),
        );
        record
    }

    /// Bump `updated_at`, then hand the current state to storage.
    fn save<S>(&mut self, storage: &mut S) -> Result<(), S::Error>
    where
        S: Storage + ?Sized,
    {
        self.base_mut().touch();
        tracing::debug!(
            entity_type = Self::TYPE_NAME,
            id = %self.id(),
            "entity saved"
        );
        storage.save(self.to_dict())
    }

    /// `[<Type>] (<id>) {<attributes>}`, for diagnostics only.
    fn display_string(&self) -> String {
        let mut attributes = self.to_dict();
        attributes.remove(CLASS_KEY);
        format!(
            "[{}] ({}) {}",
            Self::TYPE_NAME,
            self.id(),
            Value::Object(attributes)
        )
    }

    fn id(&self) -> &EntityId {
        self.base().id()
    }

    fn created_at(&self) -> Timestamp {
        self.base().created_at()
    }

    fn updated_at(&self) -> Timestamp {
        self.base().updated_at()
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.base().attribute(key)
    }

    /// Set a bag attribute. Reserved keys and `TYPED_KEYS` are rejected.
    fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, AttributeError> {
        let key = key.into();
        if Self::TYPED_KEYS.contains(&key.as_str()) {
            return Err(AttributeError::Typed {
                entity_type: Self::TYPE_NAME,
                key,
            });
        }
        self.base_mut().set_attribute(key, value)
    }

    fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.base_mut().remove_attribute(key)
    }
}
