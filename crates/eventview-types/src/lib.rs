//! eventview-types: wire-level data model for the entity graph.
//!
//! Components:
//! - `descriptor`: `EntityDescriptor` identity and the `EntityId`/`EventId` aliases.
//! - `value`: `PrimitiveFieldValue`, the tagged leaf value type, and `ValueNode`.
//! - `existence`: the `(add_time, remove_time)` liveness gate shared by storage
//!   nodes and referencer buckets.
//! - `path`: `PathElement`/`ViewPath`, the query step vocabulary.
//! - `view`: `ViewDescriptor`/`View`, the query and its materialized result.
//! - `event`: `Entity`/`EventEntity`/`Event`, the write-side records.
//! - `errors`: `TypesError`, validation failures surfaced while building the
//!   above (e.g. malformed paths).

pub mod descriptor;
pub mod errors;
pub mod event;
pub mod existence;
pub mod path;
pub mod value;
pub mod view;

pub use descriptor::{EntityDescriptor, EntityId, EntityType, EventId};
pub use errors::TypesError;
pub use event::{Entity, Event, EventEntity};
pub use existence::Existence;
pub use path::{is_well_formed, path_to_string, PathElement, ViewPath};
pub use value::{PrimitiveFieldValue, ValueNode};
pub use view::{View, ViewDescriptor, ViewExpectation};
