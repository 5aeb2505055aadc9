//! Event application: installs/updates the subject node and keeps forward and
//! reverse references consistent, materializing stub nodes for references to
//! entities that have not been written yet.

use eventview_types::{EntityDescriptor, Event, EventId};

use crate::constants::STUB_WRITE_TIME;
use crate::store::EntityStore;

#[derive(Debug, Default)]
pub struct Publisher;

impl Publisher {
    pub fn new() -> Self {
        Self
    }

    /// Applies `event` to `store`. Idempotent: replaying an already-applied or
    /// out-of-order-older event is safe (see `EntityStore::put`).
    pub fn publish(&self, store: &mut EntityStore, event: &Event) {
        let subject = event.entity.descriptor;
        let removed = store.apply_event(event);

        for (field, old_target) in removed {
            match store.get_mut(old_target) {
                Some(node) => node.remove_referencer(event.id, &field, subject),
                None => self.reference_stub(store, old_target, event.id, &field, subject, false),
            }
        }

        let new_refs: Vec<(String, EntityDescriptor)> = event
            .entity
            .fields
            .iter()
            .filter_map(|(name, value)| value.as_ref_descriptor().map(|d| (name.clone(), d)))
            .collect();

        for (field, new_target) in new_refs {
            match store.get_mut(new_target) {
                Some(node) => node.add_referencer(event.id, &field, subject),
                None => self.reference_stub(store, new_target, event.id, &field, subject, true),
            }
        }
    }

    /// Ensures a node exists for `target` (creating a stub with the synthetic
    /// `STUB_WRITE_TIME` if necessary), then wires or tears down the
    /// referencer link under `field`.
    fn reference_stub(&self, store: &mut EntityStore, target: EntityDescriptor, ref_time: EventId, field: &str, referencer: EntityDescriptor, add: bool) {
        let node = store.get_or_create_stub(target, STUB_WRITE_TIME);
        if add {
            node.add_referencer(ref_time, field, referencer);
        } else {
            node.remove_referencer(ref_time, field, referencer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventview_types::PrimitiveFieldValue;

    fn entity(descriptor: EntityDescriptor, fields: &[(&str, PrimitiveFieldValue)]) -> eventview_types::EventEntity {
        eventview_types::Entity::new(descriptor, fields.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn forward_reference_before_target_exists_creates_a_live_stub() {
        let mut store = EntityStore::new();
        let publisher = Publisher::new();

        let manager = EntityDescriptor::new(1, 23);
        let employee = EntityDescriptor::new(2, 21);

        let write = Event::new(100, entity(employee, &[("manager_id", PrimitiveFieldValue::Ref(manager))]));
        publisher.publish(&mut store, &write);

        let stub = store.get(manager).expect("stub must exist");
        assert!(!stub.exists(), "stub has no real write yet");
        assert_eq!(stub.referencers_for_field("manager_id"), vec![employee]);

        let real_write = Event::new(200, entity(manager, &[("name", PrimitiveFieldValue::Str("ted".into()))]));
        publisher.publish(&mut store, &real_write);
        let node = store.get(manager).unwrap();
        assert!(node.exists());
        assert!(node.existence().add_time > 1);
    }

    #[test]
    fn out_of_order_updates_converge_on_highest_event_id() {
        let mut store = EntityStore::new();
        let publisher = Publisher::new();
        let subject = EntityDescriptor::new(1, 21);

        publisher.publish(&mut store, &Event::new(100, entity(subject, &[("name", PrimitiveFieldValue::Str("newest".into()))])));
        publisher.publish(&mut store, &Event::new(50, entity(subject, &[("name", PrimitiveFieldValue::Str("stale".into()))])));

        assert_eq!(store.get(subject).unwrap().fields().get("name").unwrap().as_str(), Some("newest"));
    }

    #[test]
    fn rewiring_a_reference_removes_the_old_referencer_link() {
        let mut store = EntityStore::new();
        let publisher = Publisher::new();
        let subject = EntityDescriptor::new(1, 21);
        let mgr_a = EntityDescriptor::new(10, 23);
        let mgr_b = EntityDescriptor::new(20, 23);

        publisher.publish(&mut store, &Event::new(10, entity(subject, &[("manager_id", PrimitiveFieldValue::Ref(mgr_a))])));
        publisher.publish(&mut store, &Event::new(20, entity(subject, &[("manager_id", PrimitiveFieldValue::Ref(mgr_b))])));

        assert!(store.get(mgr_a).unwrap().referencers_for_field("manager_id").is_empty());
        assert_eq!(store.get(mgr_b).unwrap().referencers_for_field("manager_id"), vec![subject]);
    }
}
