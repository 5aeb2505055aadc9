//! eventview: thin wiring layer over `eventview-core`'s public façade, plus
//! environment-driven configuration for the demo binary.
//!
//! Library consumers should generally depend on `eventview-core` directly;
//! this crate exists to host the demo binary the way the teacher repo pairs
//! a root package with its own `src/main.rs` alongside a workspace of
//! library crates.

pub mod config;

pub use eventview_core::{
    make_system, make_writer, read_view, write_and_read, DispatchError, EngineConfig, EntityStore, EventLog, EventWriter, OpDispatch,
    Publisher, StorageNode, ViewReader, WriteResult,
};

#[cfg(test)]
mod tests {
    use super::config::EngineConfigEnv;

    #[test]
    fn env_config_falls_back_to_defaults_when_unset() {
        let cfg = EngineConfigEnv::from_env_or_defaults();
        assert!(cfg.ring_capacity >= 2);
    }
}
