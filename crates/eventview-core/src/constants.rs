//! Fixed constants the engine's correctness depends on.
//!
//! Changing these changes the meaning of previously-issued ids and stub
//! markers; they are not meant to be tuned per deployment (see `config` for
//! the knobs that are).

use std::time::Duration;

/// `2018-11-27T00:00:00Z` in milliseconds since the Unix epoch. Snowflake
/// timestamps are measured from here, matching the packing scheme this engine
/// was modeled on.
pub const SNOWFLAKE_EPOCH_MS: u64 = 1_543_348_706_818;

pub const TIMESTAMP_BITS: u32 = 42;
pub const WRITER_ID_BITS: u32 = 10;
pub const SEQUENCE_BITS: u32 = 12;

pub const MAX_WRITER_ID: u16 = (1 << WRITER_ID_BITS) - 1;
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Synthetic write_time assigned to stub nodes created purely to hold a
/// forward reference to an entity that has not been written yet. The smallest
/// non-zero event id, so any real event for the same descriptor supersedes it.
pub const STUB_WRITE_TIME: u64 = 1;

/// Baseline idle backoff for the dispatcher worker when the MPSC ring is empty.
pub const DISPATCH_IDLE_BACKOFF: Duration = Duration::from_millis(250);

/// Recursion guard for view traversal; paths longer than this are rejected
/// rather than walked, since nothing in the model bounds path length otherwise.
pub const MAX_VIEW_PATH_DEPTH: usize = 64;
