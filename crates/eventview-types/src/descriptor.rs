use serde::{Deserialize, Serialize};

/// Identity of an entity: an opaque id paired with a type tag.
pub type EntityId = u64;
pub type EntityType = u64;
/// Event ids double as the store's ordering key (see `Existence`).
pub type EventId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub id: EntityId,
    pub r#type: EntityType,
}

impl EntityDescriptor {
    /// `id == 0` means "assign the next event id" at write time.
    pub const UNSET_ID: EntityId = 0;

    pub fn new(id: EntityId, r#type: EntityType) -> Self {
        Self { id, r#type }
    }

    pub fn is_unset(&self) -> bool {
        self.id == Self::UNSET_ID
    }
}
