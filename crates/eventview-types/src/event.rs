use serde::{Deserialize, Serialize};

use crate::descriptor::{EntityDescriptor, EventId};
use crate::value::ValueNode;

/// An entity's identity paired with its current field map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entity {
    pub descriptor: EntityDescriptor,
    pub fields: ValueNode,
}

impl Entity {
    pub fn new(descriptor: EntityDescriptor, fields: ValueNode) -> Self {
        Self { descriptor, fields }
    }
}

/// An `Entity` as carried in a write request, before an event id is assigned.
pub type EventEntity = Entity;

/// A versioned replacement of an entity's field map, keyed by a monotonically
/// increasing event id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub entity: EventEntity,
}

impl Event {
    pub fn new(id: EventId, entity: EventEntity) -> Self {
        Self { id, entity }
    }
}
