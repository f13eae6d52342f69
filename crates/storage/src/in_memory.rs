use std::collections::BTreeMap;

use serde_json::Value;

use hbnb_core::{AnyEntity, CLASS_KEY, ID_KEY, Record, Registry, Storage};

use crate::error::{StorageError, StorageResult};

/// Storage key of a record: `<__class__>.<id>`.
pub fn record_key(record: &Record) -> StorageResult<String> {
    let type_name = record
        .get(CLASS_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::MalformedRecord(format!("missing `{CLASS_KEY}`")))?;
    let id = record
        .get(ID_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| StorageError::MalformedRecord(format!("missing `{ID_KEY}`")))?;
    Ok(format!("{type_name}.{id}"))
}

/// In-memory storage collaborator.
///
/// `tracked` holds the latest snapshot of every known entity; `persisted` is
/// what the last flush wrote. Intended for tests/dev.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    tracked: BTreeMap<String, Record>,
    persisted: BTreeMap<String, Record>,
    flushes: u64,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from records a previous process persisted. Nothing is tracked
    /// until [`reload`](Self::reload) is called.
    pub fn from_persisted(records: impl IntoIterator<Item = Record>) -> StorageResult<Self> {
        let mut persisted = BTreeMap::new();
        for record in records {
            persisted.insert(record_key(&record)?, record);
        }
        Ok(Self {
            persisted,
            ..Self::default()
        })
    }

    /// Every tracked record, keyed by `<Type>.<id>`.
    pub fn all(&self) -> &BTreeMap<String, Record> {
        &self.tracked
    }

    pub fn get(&self, type_name: &str, id: &str) -> Option<&Record> {
        self.tracked.get(&format!("{type_name}.{id}"))
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Records as of the last flush.
    pub fn persisted(&self) -> &BTreeMap<String, Record> {
        &self.persisted
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Rebuild every persisted record through `registry` and track them again.
    ///
    /// Fails on the first record that cannot be reconstructed; tracked state is
    /// left untouched in that case.
    pub fn reload(&mut self, registry: &Registry) -> StorageResult<Vec<Box<dyn AnyEntity>>> {
        let mut entities = Vec::with_capacity(self.persisted.len());
        for (key, record) in &self.persisted {
            let entity = registry
                .reconstruct(record.clone())
                .map_err(|source| StorageError::Parse {
                    key: key.clone(),
                    source,
                })?;
            entities.push(entity);
        }

        self.tracked = self.persisted.clone();
        tracing::debug!(records = entities.len(), "storage reloaded");
        Ok(entities)
    }

    fn flush(&mut self) {
        self.persisted = self.tracked.clone();
        self.flushes += 1;
        tracing::debug!(
            records = self.persisted.len(),
            flushes = self.flushes,
            "storage flushed"
        );
    }
}

impl Storage for InMemoryStorage {
    type Error = StorageError;

    fn new(&mut self, record: Record) {
        let key = match record_key(&record) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed record");
                return;
            }
        };

        tracing::debug!(key = %key, "record registered");
        if self.tracked.insert(key.clone(), record).is_some() {
            tracing::warn!(key = %key, "record registered twice; keeping latest");
        }
    }

    fn save(&mut self, record: Record) -> Result<(), Self::Error> {
        let key = record_key(&record)?;
        self.tracked.insert(key, record);
        self.flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test records are objects"),
        }
    }

    fn sample(id: &str) -> Record {
        record(json!({
            "__class__": "BaseModel",
            "id": id,
            "created_at": "2017-09-28T21:05:54.119427",
            "updated_at": "2017-09-28T21:05:54.119427",
        }))
    }

    #[test]
    fn record_key_joins_type_and_id() {
        assert_eq!(record_key(&sample("42")).unwrap(), "BaseModel.42");
    }

    #[test]
    fn record_key_requires_tag_and_id() {
        let mut untagged = sample("42");
        untagged.remove(CLASS_KEY);
        assert!(matches!(
            record_key(&untagged),
            Err(StorageError::MalformedRecord(_))
        ));

        let mut anonymous = sample("42");
        anonymous.insert(ID_KEY.to_string(), json!(42));
        assert!(record_key(&anonymous).is_err());
    }

    #[test]
    fn new_tracks_without_flushing() {
        let mut storage = InMemoryStorage::new();
        storage.new(sample("a"));

        assert_eq!(storage.len(), 1);
        assert!(storage.get("BaseModel", "a").is_some());
        assert!(storage.persisted().is_empty());
        assert_eq!(storage.flush_count(), 0);
    }

    #[test]
    fn new_ignores_malformed_records() {
        let mut storage = InMemoryStorage::new();
        storage.new(Record::new());
        assert!(storage.is_empty());
    }

    #[test]
    fn save_upserts_and_flushes_everything() {
        let mut storage = InMemoryStorage::new();
        storage.new(sample("a"));
        storage.new(sample("b"));

        let mut updated = sample("a");
        updated.insert("name".to_string(), json!("changed"));
        storage.save(updated).unwrap();

        assert_eq!(storage.flush_count(), 1);
        assert_eq!(storage.persisted().len(), 2);
        assert_eq!(
            storage.persisted()["BaseModel.a"]["name"],
            json!("changed")
        );
    }

    #[test]
    fn save_rejects_malformed_records() {
        let mut storage = InMemoryStorage::new();
        assert!(matches!(
            storage.save(Record::new()),
            Err(StorageError::MalformedRecord(_))
        ));
        assert_eq!(storage.flush_count(), 0);
    }

    #[test]
    fn from_persisted_defers_tracking() {
        let storage = InMemoryStorage::from_persisted([sample("a"), sample("b")]).unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.persisted().len(), 2);
    }

    #[test]
    fn reload_reports_the_failing_record() {
        let mut broken = sample("bad");
        broken.insert("created_at".to_string(), json!("not-a-date"));
        let mut storage = InMemoryStorage::from_persisted([broken]).unwrap();

        let mut registry = Registry::new();
        registry.register::<Plain>();

        match storage.reload(&registry) {
            Err(StorageError::Parse { key, .. }) => assert_eq!(key, "BaseModel.bad"),
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(storage.is_empty());
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Plain {
        base: hbnb_core::EntityBase,
    }

    impl hbnb_core::Entity for Plain {
        const TYPE_NAME: &'static str = "BaseModel";

        fn from_base(base: hbnb_core::EntityBase) -> Self {
            Self { base }
        }

        fn base(&self) -> &hbnb_core::EntityBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut hbnb_core::EntityBase {
            &mut self.base
        }
    }
}
