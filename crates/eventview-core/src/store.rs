//! In-memory entity storage: per-node value fields plus a reverse-reference
//! index, governed by event-time ordering so replays and out-of-order
//! delivery converge to the same state.

use std::collections::HashMap;

use eventview_types::{EntityDescriptor, EntityId, Event, Existence, EventId, ValueNode};

/// A single entity's record in the store.
///
/// A node with `existence.add_time == 0` (unset) is a *stub*: it was created
/// purely to anchor a reverse reference from some other node and has never
/// received a real write.
#[derive(Debug, Clone)]
pub struct StorageNode {
    existence: Existence,
    descriptor: EntityDescriptor,
    fields: ValueNode,
    referencers: HashMap<String, HashMap<EntityDescriptor, Existence>>,
}

impl StorageNode {
    fn new(descriptor: EntityDescriptor, write_time: EventId, fields: ValueNode) -> Self {
        let mut existence = Existence::default();
        existence.touch(write_time);
        Self { existence, descriptor, fields, referencers: HashMap::new() }
    }

    pub fn descriptor(&self) -> EntityDescriptor {
        self.descriptor
    }

    pub fn exists(&self) -> bool {
        self.existence.exists()
    }

    pub fn existence(&self) -> Existence {
        self.existence
    }

    pub fn fields(&self) -> &ValueNode {
        &self.fields
    }

    /// Replaces the field map if `update_time` is newer than the node's
    /// current `add_time` and the update targets the same descriptor.
    /// Returns the descriptor-valued fields that held *before* the update, so
    /// the publisher can tear down their referencer links.
    pub fn update_fields(&mut self, update_time: EventId, descriptor: EntityDescriptor, fields: ValueNode) -> Vec<(String, EntityDescriptor)> {
        if update_time <= self.existence.add_time || descriptor != self.descriptor {
            return Vec::new();
        }

        let previous_refs = self
            .fields
            .iter()
            .filter_map(|(name, value)| value.as_ref_descriptor().map(|d| (name.clone(), d)))
            .collect();

        self.fields = fields;
        self.existence.touch(update_time);
        previous_refs
    }

    pub fn add_referencer(&mut self, write_time: EventId, field: &str, referencer: EntityDescriptor) {
        self.referencers.entry(field.to_string()).or_default().entry(referencer).or_default().touch(write_time);
        self.existence.touch(write_time);
    }

    pub fn remove_referencer(&mut self, write_time: EventId, field: &str, referencer: EntityDescriptor) {
        if let Some(bucket) = self.referencers.get_mut(field) {
            bucket.entry(referencer).or_default().deref(write_time);
        }
        self.existence.touch(write_time);
    }

    /// Live descriptors currently referencing this node under `field`. Order
    /// is unspecified.
    pub fn referencers_for_field(&self, field: &str) -> Vec<EntityDescriptor> {
        self.referencers
            .get(field)
            .map(|bucket| bucket.iter().filter(|(_, existence)| existence.exists()).map(|(d, _)| *d).collect())
            .unwrap_or_default()
    }
}

/// `id -> StorageNode` map. Does not itself create stub nodes; that is the
/// publisher's job (it is the only caller with enough context to know a
/// forward reference is being installed).
#[derive(Debug, Default)]
pub struct EntityStore {
    nodes: HashMap<EntityId, StorageNode>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup: absent if no node exists, or if the node's type does not
    /// match the queried descriptor's type.
    pub fn get(&self, descriptor: EntityDescriptor) -> Option<&StorageNode> {
        self.nodes.get(&descriptor.id).filter(|node| node.descriptor.r#type == descriptor.r#type)
    }

    pub fn get_mut(&mut self, descriptor: EntityDescriptor) -> Option<&mut StorageNode> {
        self.nodes.get_mut(&descriptor.id).filter(|node| node.descriptor.r#type == descriptor.r#type)
    }

    /// Installs a fresh node or delegates to `update_fields` on an existing
    /// one. Returns the descriptor fields that were replaced/removed by this
    /// write (empty for a fresh insert).
    pub fn put(&mut self, write_time: EventId, descriptor: EntityDescriptor, fields: ValueNode) -> Vec<(String, EntityDescriptor)> {
        match self.nodes.get_mut(&descriptor.id) {
            None => {
                self.nodes.insert(descriptor.id, StorageNode::new(descriptor, write_time, fields));
                Vec::new()
            }
            Some(node) => node.update_fields(write_time, descriptor, fields),
        }
    }

    /// Ensures a node exists for `descriptor`, creating a stub (empty fields,
    /// `write_time`-stamped existence) if absent. Returns a mutable handle.
    pub fn get_or_create_stub(&mut self, descriptor: EntityDescriptor, write_time: EventId) -> &mut StorageNode {
        self.nodes.entry(descriptor.id).or_insert_with(|| StorageNode::new(descriptor, write_time, ValueNode::new()))
    }

    pub fn apply_event(&mut self, event: &Event) -> Vec<(String, EntityDescriptor)> {
        self.put(event.id, event.entity.descriptor, event.entity.fields.clone())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventview_types::PrimitiveFieldValue;

    fn fields(pairs: &[(&str, PrimitiveFieldValue)]) -> ValueNode {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn fresh_insert_has_no_removed_refs() {
        let mut store = EntityStore::new();
        let desc = EntityDescriptor::new(1, 23);
        let removed = store.put(10, desc, fields(&[("name", PrimitiveFieldValue::Str("ted".into()))]));
        assert!(removed.is_empty());
        assert!(store.get(desc).unwrap().exists());
    }

    #[test]
    fn stale_update_is_ignored() {
        let mut store = EntityStore::new();
        let desc = EntityDescriptor::new(1, 23);
        store.put(100, desc, fields(&[("name", PrimitiveFieldValue::Str("newer".into()))]));
        let removed = store.put(50, desc, fields(&[("name", PrimitiveFieldValue::Str("older".into()))]));
        assert!(removed.is_empty());
        assert_eq!(store.get(desc).unwrap().fields().get("name").unwrap().as_str(), Some("newer"));
    }

    #[test]
    fn update_returns_previously_referenced_descriptors() {
        let mut store = EntityStore::new();
        let desc = EntityDescriptor::new(1, 21);
        let mgr_a = EntityDescriptor::new(10, 23);
        let mgr_b = EntityDescriptor::new(20, 23);
        store.put(10, desc, fields(&[("manager_id", PrimitiveFieldValue::Ref(mgr_a))]));
        let removed = store.put(20, desc, fields(&[("manager_id", PrimitiveFieldValue::Ref(mgr_b))]));
        assert_eq!(removed, vec![("manager_id".to_string(), mgr_a)]);
    }

    #[test]
    fn referencers_for_field_excludes_dereffed_entries() {
        let mut store = EntityStore::new();
        let target = EntityDescriptor::new(1, 23);
        store.put(1, target, ValueNode::new());
        let referencer = EntityDescriptor::new(2, 21);
        store.get_mut(target).unwrap().add_referencer(5, "manager_id", referencer);
        assert_eq!(store.get(target).unwrap().referencers_for_field("manager_id"), vec![referencer]);

        store.get_mut(target).unwrap().remove_referencer(6, "manager_id", referencer);
        assert!(store.get(target).unwrap().referencers_for_field("manager_id").is_empty());
    }

    #[test]
    fn get_is_typed_by_descriptor_type() {
        let mut store = EntityStore::new();
        let desc = EntityDescriptor::new(1, 23);
        store.put(1, desc, ValueNode::new());
        assert!(store.get(EntityDescriptor::new(1, 999)).is_none());
    }
}
