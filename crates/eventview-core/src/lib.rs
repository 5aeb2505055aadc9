//! eventview-core: the event-sourced entity graph engine.
//!
//! Components:
//! - `id`: snowflake id packing/provider (`IdPacker`, `SnowflakeProvider`).
//! - `mpsc`: the bounded lock-free ring the dispatcher is built on.
//! - `store`: `StorageNode`/`EntityStore`, the in-memory entity graph.
//! - `publish`: `Publisher`, the event application algorithm.
//! - `view_reader`: `ViewReader`, recursive path traversal over the store.
//! - `dispatch`: `OpDispatch`, the single-threaded serialization gateway.
//! - `writer`: `EventWriter`/`EventLog`/`WriteResult`, the write-side façade.
//! - `facade`: `make_system`/`make_writer`/`read_view`/`write_and_read`, the
//!   public entry points that wire everything above together.
//! - `config`: `EngineConfig`, construction-time knobs.
//! - `errors`: `DispatchError`, the typed error surface.

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod facade;
pub mod id;
pub mod mpsc;
pub mod publish;
pub mod store;
pub mod view_reader;
pub mod writer;

pub use config::EngineConfig;
pub use dispatch::OpDispatch;
pub use errors::DispatchError;
pub use facade::{make_system, make_writer, read_view, write_and_read};
pub use id::{IdPacker, SnowflakeProvider};
pub use publish::Publisher;
pub use store::{EntityStore, StorageNode};
pub use view_reader::ViewReader;
pub use writer::{EventLog, EventWriter, WriteResult};
