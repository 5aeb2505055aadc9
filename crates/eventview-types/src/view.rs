use serde::{Deserialize, Serialize};

use crate::descriptor::{EntityDescriptor, EventId};
use crate::errors::TypesError;
use crate::path::{is_well_formed, path_to_string, PathElement, ViewPath};
use crate::value::PrimitiveFieldValue;

/// A read-after-write fence: materialize the view only once `target` has been
/// updated at least as recently as `at_least`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewExpectation {
    pub target: EntityDescriptor,
    pub at_least: EventId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub root: EntityDescriptor,
    pub paths: Vec<ViewPath>,
    pub expectation: Option<ViewExpectation>,
}

impl ViewDescriptor {
    pub fn new(root: EntityDescriptor, paths: Vec<ViewPath>) -> Self {
        Self { root, paths, expectation: None }
    }

    pub fn with_expectation(mut self, expectation: ViewExpectation) -> Self {
        self.expectation = Some(expectation);
        self
    }

    /// Checks every path against the value/ref-step shape rule. Called by
    /// `ViewReader::read_view` before traversal; exposed here too so callers
    /// can validate a descriptor as soon as it's built.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.paths.iter().all(|p| is_well_formed(p)) {
            Ok(())
        } else {
            Err(TypesError::MalformedPath)
        }
    }
}

/// Materialized query result. Reverse-ref steps can contribute more than one
/// binding per path, hence the multimap shape (a flat `Vec` of pairs keyed by
/// the stringified path).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct View {
    pub root: EntityDescriptor,
    values: Vec<(String, PrimitiveFieldValue)>,
}

impl View {
    pub fn new(root: EntityDescriptor) -> Self {
        Self { root, values: Vec::new() }
    }

    pub fn push(&mut self, path: &[PathElement], value: PrimitiveFieldValue) {
        self.values.push((path_to_string(path), value));
    }

    /// All values bound to a given path key, in insertion order.
    pub fn get(&self, path_key: &str) -> Vec<&PrimitiveFieldValue> {
        self.values.iter().filter(|(k, _)| k == path_key).map(|(_, v)| v).collect()
    }

    /// The first value bound to a path key, for single-valued (forward-only) paths.
    pub fn get_one(&self, path_key: &str) -> Option<&PrimitiveFieldValue> {
        self.values.iter().find(|(k, _)| k == path_key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, PrimitiveFieldValue)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathElement;

    #[test]
    fn view_get_collects_multiple_bindings() {
        let mut view = View::new(EntityDescriptor::new(1, 23));
        let path = vec![PathElement::reverse_ref("manager_id", 21), PathElement::value("name")];
        view.push(&path, PrimitiveFieldValue::Str("john".into()));
        view.push(&path, PrimitiveFieldValue::Str("jane".into()));
        assert_eq!(view.get("manager_id.name").len(), 2);
    }
}
