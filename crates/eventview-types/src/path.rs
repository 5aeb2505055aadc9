use serde::{Deserialize, Serialize};

use crate::descriptor::EntityType;

/// One step of a view path.
///
/// - `type == 0` => value step: `name` addresses a primitive field.
/// - `type > 0 && forward` => forward reference: `name` addresses a
///   descriptor-valued field whose target type must equal `type`.
/// - `type > 0 && !forward` => reverse reference: selects nodes of `type`
///   that hold a forward reference to the current node under `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathElement {
    pub name: String,
    pub r#type: EntityType,
    pub forward: bool,
}

impl PathElement {
    pub fn value(name: impl Into<String>) -> Self {
        Self { name: name.into(), r#type: 0, forward: false }
    }

    pub fn forward_ref(name: impl Into<String>, target_type: EntityType) -> Self {
        Self { name: name.into(), r#type: target_type, forward: true }
    }

    pub fn reverse_ref(name: impl Into<String>, source_type: EntityType) -> Self {
        Self { name: name.into(), r#type: source_type, forward: false }
    }

    pub fn is_value(&self) -> bool {
        self.r#type == 0
    }

    pub fn is_forward_ref(&self) -> bool {
        self.r#type != 0 && self.forward
    }

    pub fn is_reverse_ref(&self) -> bool {
        self.r#type != 0 && !self.forward
    }
}

pub type ViewPath = Vec<PathElement>;

/// Joins a path's element names with `.`, used as the flattened key in a `View`.
pub fn path_to_string(path: &[PathElement]) -> String {
    path.iter().map(|e| e.name.as_str()).collect::<Vec<_>>().join(".")
}

/// Valid shape: zero or more ref steps followed by exactly one value step.
pub fn is_well_formed(path: &[PathElement]) -> bool {
    match path.split_last() {
        None => false,
        Some((last, rest)) => last.is_value() && rest.iter().all(|e| !e.is_value()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_to_string_joins_names() {
        let path = vec![PathElement::reverse_ref("manager_id", 21), PathElement::value("name")];
        assert_eq!(path_to_string(&path), "manager_id.name");
    }

    #[test]
    fn well_formed_requires_trailing_value_step() {
        let ok = vec![PathElement::forward_ref("manager_id", 23), PathElement::value("name")];
        assert!(is_well_formed(&ok));

        let bad = vec![PathElement::forward_ref("manager_id", 23)];
        assert!(!is_well_formed(&bad));

        let empty: ViewPath = vec![];
        assert!(!is_well_formed(&empty));
    }
}
