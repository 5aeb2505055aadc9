use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::EntityDescriptor;

/// A tagged leaf value. Float equality is bitwise (`to_bits`), not numeric, so
/// the type can derive `Eq`/`Hash` and be used in sets and map keys in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PrimitiveFieldValue {
    UInt(u64),
    Float(f64),
    Str(String),
    Bool(bool),
    Ref(EntityDescriptor),
}

impl PrimitiveFieldValue {
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_ref_descriptor(&self) -> Option<EntityDescriptor> {
        match self {
            Self::Ref(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }
}

impl PartialEq for PrimitiveFieldValue {
    fn eq(&self, other: &Self) -> bool {
        use PrimitiveFieldValue::*;
        match (self, other) {
            (UInt(a), UInt(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Str(a), Str(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Ref(a), Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PrimitiveFieldValue {}

impl std::hash::Hash for PrimitiveFieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::UInt(v) => (0u8, v).hash(state),
            Self::Float(v) => (1u8, v.to_bits()).hash(state),
            Self::Str(v) => (2u8, v).hash(state),
            Self::Bool(v) => (3u8, v).hash(state),
            Self::Ref(v) => (4u8, v).hash(state),
        }
    }
}

impl From<u64> for PrimitiveFieldValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for PrimitiveFieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for PrimitiveFieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for PrimitiveFieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<bool> for PrimitiveFieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<EntityDescriptor> for PrimitiveFieldValue {
    fn from(v: EntityDescriptor) -> Self {
        Self::Ref(v)
    }
}

/// A field map. Order is preserved but not semantically significant; `IndexMap`
/// is used purely because it is already part of the dependency stack and gives
/// deterministic iteration for tests and logging.
pub type ValueNode = IndexMap<String, PrimitiveFieldValue>;
