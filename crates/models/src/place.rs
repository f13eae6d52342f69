use serde_json::Value;

use hbnb_core::field::{take_f64, take_string, take_string_list, take_u64};
use hbnb_core::{AttributeError, Entity, EntityBase, ParseResult, Record};

/// A listing offered by a user in a city.
///
/// `city_id`, `user_id` and `amenity_ids` hold ids of other entities; nothing
/// here checks that they resolve. Coordinates are always finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    base: EntityBase,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: u64,
    pub number_bathrooms: u64,
    pub max_guest: u64,
    pub price_by_night: u64,
    latitude: f64,
    longitude: f64,
    pub amenity_ids: Vec<String>,
}

impl Place {
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Rejects NaN and infinities, which have no JSON form.
    pub fn set_latitude(&mut self, latitude: f64) -> Result<(), AttributeError> {
        self.latitude = finite("latitude", latitude)?;
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<(), AttributeError> {
        self.longitude = finite("longitude", longitude)?;
        Ok(())
    }

    pub fn add_amenity(&mut self, amenity_id: impl Into<String>) -> bool {
        let amenity_id = amenity_id.into();
        if self.amenity_ids.contains(&amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id);
        true
    }
}

fn finite(key: &str, value: f64) -> Result<f64, AttributeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AttributeError::NonFinite(key.to_string()))
    }
}

impl Entity for Place {
    const TYPE_NAME: &'static str = "Place";
    const TYPED_KEYS: &'static [&'static str] = &[
        "city_id",
        "user_id",
        "name",
        "description",
        "number_rooms",
        "number_bathrooms",
        "max_guest",
        "price_by_night",
        "latitude",
        "longitude",
        "amenity_ids",
    ];

    fn from_base(base: EntityBase) -> Self {
        Self {
            base,
            city_id: String::new(),
            user_id: String::new(),
            name: String::new(),
            description: String::new(),
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: 0.0,
            longitude: 0.0,
            amenity_ids: Vec::new(),
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
            ("city_id", &mut self.city_id),
            ("user_id", &mut self.user_id),
            ("name", &mut self.name),
            ("description", &mut self.description),
        ] {
            if let Some(value) = take_string(fields, key)? {
                *slot = value;
            }
        }
        for (key, slot) in [
            ("number_rooms", &mut self.number_rooms),
            ("number_bathrooms", &mut self.number_bathrooms),
            ("max_guest", &mut self.max_guest),
            ("price_by_night", &mut self.price_by_night),
        ] {
            if let Some(value) = take_u64(fields, key)? {
                *slot = value;
            }
        }
        if let Some(latitude) = take_f64(fields, "latitude")? {
            self.latitude = latitude;
        }
        if let Some(longitude) = take_f64(fields, "longitude")? {
            self.longitude = longitude;
        }
        if let Some(amenity_ids) = take_string_list(fields, "amenity_ids")? {
            self.amenity_ids = amenity_ids;
        }
        Ok(())
    }

    fn write_fields(&self, record: &mut Record) {
        let mut put = |key: &str, value: Value| {
            record.insert(key.to_string(), value);
        };
        put("city_id", Value::from(self.city_id.clone()));
        put("user_id", Value::from(self.user_id.clone()));
        put("name", Value::from(self.name.clone()));
        put("description", Value::from(self.description.clone()));
        put("number_rooms", Value::from(self.number_rooms));
        put("number_bathrooms", Value::from(self.number_bathrooms));
        put("max_guest", Value::from(self.max_guest));
        put("price_by_night", Value::from(self.price_by_night));
        put("latitude", Value::from(self.latitude));
        put("longitude", Value::from(self.longitude));
        put("amenity_ids", Value::from(self.amenity_ids.clone()));
    }
}
