//! Recursive path traversal: walks a `ViewDescriptor`'s paths through the
//! store, following forward references, reverse-reference buckets, and value
//! leaves to build a flat `View`.

use eventview_types::{PathElement, View, ViewDescriptor, ViewPath};

use crate::constants::MAX_VIEW_PATH_DEPTH;
use crate::errors::DispatchError;
use crate::store::{EntityStore, StorageNode};

#[derive(Debug, Default)]
pub struct ViewReader;

impl ViewReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_view(&self, store: &EntityStore, view_desc: &ViewDescriptor) -> Result<Option<View>, DispatchError> {
        view_desc.validate()?;
        for path in &view_desc.paths {
            if path.len() > MAX_VIEW_PATH_DEPTH {
                return Err(DispatchError::PathTooDeep { max: MAX_VIEW_PATH_DEPTH });
            }
        }

        if let Some(expectation) = &view_desc.expectation {
            let met = store.get(expectation.target).map(|n| n.existence().add_time >= expectation.at_least).unwrap_or(false);
            if !met {
                return Ok(None);
            }
        }

        let Some(root_node) = store.get(view_desc.root) else {
            return Ok(None);
        };

        let mut view = View::new(view_desc.root);
        for path in &view_desc.paths {
            self.process_path_element(store, path, 0, root_node, &mut view);
        }
        Ok(Some(view))
    }

    fn process_path_element(&self, store: &EntityStore, path: &ViewPath, idx: usize, node: &StorageNode, view: &mut View) {
        let Some(elem) = path.get(idx) else { return };

        if elem.is_value() {
            self.load_value(path, elem, node, view);
        } else if elem.is_forward_ref() {
            self.follow_ref(store, path, elem, idx, node, view);
        } else if elem.is_reverse_ref() {
            self.follow_reverse_refs(store, path, elem, idx, node, view);
        }
    }

    fn follow_ref(&self, store: &EntityStore, path: &ViewPath, elem: &PathElement, idx: usize, node: &StorageNode, view: &mut View) {
        let Some(value) = node.fields().get(&elem.name) else { return };
        let Some(descriptor) = value.as_ref_descriptor() else { return };
        if descriptor.r#type != elem.r#type {
            return;
        }
        if let Some(next_node) = store.get(descriptor) {
            self.process_path_element(store, path, idx + 1, next_node, view);
        }
    }

    fn follow_reverse_refs(&self, store: &EntityStore, path: &ViewPath, elem: &PathElement, idx: usize, node: &StorageNode, view: &mut View) {
        for descriptor in node.referencers_for_field(&elem.name) {
            if descriptor.r#type != elem.r#type {
                continue;
            }
            if let Some(next_node) = store.get(descriptor) {
                self.process_path_element(store, path, idx + 1, next_node, view);
            }
        }
    }

    fn load_value(&self, path: &ViewPath, elem: &PathElement, node: &StorageNode, view: &mut View) {
        if let Some(value) = node.fields().get(&elem.name) {
            view.push(path, value.clone());
        }
    }
}
