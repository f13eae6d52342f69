use hbnb_core::{Entity, EntityBase};

/// Generic entity with no typed fields.
///
/// Anything beyond the base lives in the attribute bag, which makes this the
/// type to use for ad-hoc records.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    base: EntityBase,
}

impl Entity for BaseModel {
    const TYPE_NAME: &'static str = "BaseModel";

    fn from_base(base: EntityBase) -> Self {
        Self { base }
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EntityBase {
        &mut self.base
    }
}
