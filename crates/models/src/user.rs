use serde_json::Value;

use hbnb_core::field::take_string;
use hbnb_core::{Entity, EntityBase, ParseResult, Record};

/// A registered account.
///
/// All typed fields default to the empty string and are always written to the
/// record, even when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    base: EntityBase,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, _) => self.last_name.clone(),
        }
    }
}

impl Entity for User {
    const TYPE_NAME: &'static str = "User";
    const TYPED_KEYS: &'static [&'static str] = &["email", "password", "first_name", "last_name"];

    fn from_base(base: EntityBase) -> Self {
        Self {
            base,
            email: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }

    fn read_fields(&mut self, fields: &mut Record) -> ParseResult<()> {
        for (key, slot) in [
            ("email", &mut self.email),
            ("password", &mut self.password),
            ("first_name", &mut self.first_name),
            ("last_name", &mut self.last_name),
        ] {
            if let Some(value) = take_string(fields, key)? {
                *slot = value;
            }
        }
        Ok(())
    }

    fn write_fields(&self, record: &mut Record) {
        for (key, value) in [
            ("email", &self.email),
            ("password", &self.password),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
        ] {
            record.insert(key.to_string(), Value::String(value.clone()));
        }
    }
}
