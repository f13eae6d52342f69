//! Concrete entity types.
//!
//! Each type registers itself in the process-wide [`registry`] so storage can
//! rebuild heterogeneous collections from their `__class__` tags.

use std::sync::OnceLock;

use hbnb_core::Registry;

pub mod base_model;
pub mod place;
pub mod user;

pub use base_model::BaseModel;
pub use place::Place;
pub use user::User;

macro_rules! impl_display_via_entity {
    ($($t:ty),+ $(,)?) => {
        $(
            impl core::fmt::Display for $t {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.write_str(&hbnb_core::Entity::display_string(self))
                }
            }
        )+
    };
}

impl_display_via_entity!(BaseModel, User, Place);

/// Register every entity type defined in this crate.
pub fn register_all(registry: &mut Registry) {
    registry
        .register::<BaseModel>()
        .register::<User>()
        .register::<Place>();
}

/// Registry holding every entity type of this crate, built on first use.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        register_all(&mut registry);
        tracing::debug!(types = registry.len(), "entity registry initialized");
        registry
    })
}
