//! Environment-variable configuration loading for the demo binary, following
//! the `.env` + `once_cell::Lazy` convention used elsewhere in this stack.

use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

use eventview_core::EngineConfig;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

/// `EngineConfig`, but loaded from `EVENTVIEW_RING_CAPACITY` /
/// `EVENTVIEW_IDLE_BACKOFF_MS` (with sane defaults if unset or unparsable).
#[derive(Debug, Clone)]
pub struct EngineConfigEnv {
    pub ring_capacity: usize,
    pub idle_backoff: Duration,
    pub writer_id: u16,
}

impl EngineConfigEnv {
    pub fn from_env_or_defaults() -> Self {
        Lazy::force(&DOTENV_LOADED);

        let defaults = EngineConfig::default();
        let ring_capacity = env::var("EVENTVIEW_RING_CAPACITY").ok().and_then(|v| v.parse().ok()).unwrap_or(defaults.ring_capacity);
        let idle_backoff_ms = env::var("EVENTVIEW_IDLE_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| defaults.idle_backoff.as_millis() as u64);
        let writer_id = env::var("EVENTVIEW_WRITER_ID").ok().and_then(|v| v.parse().ok()).unwrap_or(0);

        Self { ring_capacity, idle_backoff: Duration::from_millis(idle_backoff_ms), writer_id }
    }

    pub fn into_engine_config(self) -> EngineConfig {
        EngineConfig::default().with_ring_capacity(self.ring_capacity).with_idle_backoff(self.idle_backoff)
    }
}

/// Forces early `.env` loading for applications that want it to happen before
/// their first config read.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
