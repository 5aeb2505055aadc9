//! Write-side façade: assigns event ids, appends to the (in-memory) log, and
//! fans writes out to the dispatcher.

use std::sync::{Arc, Mutex};

use eventview_types::{Event, EventEntity, EventId};

use crate::dispatch::OpDispatch;
use crate::errors::DispatchError;
use crate::id::SnowflakeProvider;

/// Outcome of a single write. Mirrors the original's variant-typed result: a
/// successful write carries the assigned event id, a failed one carries a
/// display-ready message, and callers are expected to branch on `is_ok()`
/// rather than pattern-match a generic `Result`.
#[derive(Debug, Clone)]
pub enum WriteResult {
    Ok(EventId),
    Err(String),
}

impl WriteResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Self::Ok(id) => Some(*id),
            Self::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Err(msg) => Some(msg.as_str()),
            Self::Ok(_) => None,
        }
    }
}

impl From<DispatchError> for WriteResult {
    fn from(e: DispatchError) -> Self {
        WriteResult::Err(e.to_string())
    }
}

/// Append-only record of every event submitted through this log, plus the
/// ability to replay them all against the dispatcher. Replay is safe because
/// publish application is idempotent under out-of-order/duplicate delivery.
#[derive(Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
    dispatch: Arc<OpDispatch>,
}

impl EventLog {
    pub fn new(dispatch: Arc<OpDispatch>) -> Self {
        Self { events: Arc::new(Mutex::new(Vec::new())), dispatch }
    }

    pub async fn append(&self, event: Event) -> Result<(), DispatchError> {
        self.events.lock().expect("event log mutex poisoned").push(event.clone());
        let rx = self.dispatch.publish_event(event)?;
        rx.await.map_err(|_| DispatchError::Poisoned)?
    }

    pub async fn replay(&self) -> Result<(), DispatchError> {
        let snapshot = self.events.lock().expect("event log mutex poisoned").clone();
        log::info!("replaying {} stored events", snapshot.len());
        for event in snapshot {
            let rx = self.dispatch.publish_event(event)?;
            rx.await.map_err(|_| DispatchError::Poisoned)??;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("event log mutex poisoned").len()
    }
}

/// One producer's handle onto the system: owns a distinct `writer_id` for
/// snowflake allocation and a shared handle to the event log.
pub struct EventWriter {
    snowflakes: SnowflakeProvider,
    log: EventLog,
}

impl EventWriter {
    pub fn new(writer_id: u16, log: EventLog) -> Result<Self, DispatchError> {
        Ok(Self { snowflakes: SnowflakeProvider::new(writer_id)?, log })
    }

    /// Exposes raw snowflake allocation so callers can pre-allocate a
    /// descriptor id before constructing the entity that uses it (e.g. to
    /// hand a not-yet-written id to a sibling write).
    pub fn next_id(&self) -> EventId {
        self.snowflakes.next()
    }

    pub async fn write_event(&self, mut entity: EventEntity) -> WriteResult {
        let event_id = self.snowflakes.next();
        if entity.descriptor.is_unset() {
            entity.descriptor.id = event_id;
        }

        match self.log.append(Event::new(event_id, entity)).await {
            Ok(()) => WriteResult::Ok(event_id),
            Err(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use eventview_types::{Entity, EntityDescriptor, ValueNode};

    #[tokio::test]
    async fn write_event_assigns_the_sentinel_id() {
        let dispatch = Arc::new(OpDispatch::new(EngineConfig::default()));
        let log = EventLog::new(Arc::clone(&dispatch));
        let writer = EventWriter::new(1, log).unwrap();

        let entity = Entity::new(EntityDescriptor::new(0, 23), ValueNode::new());
        let result = writer.write_event(entity).await;
        assert!(result.is_ok());
        assert!(result.event_id().unwrap() > 0);
    }

    #[tokio::test]
    async fn replay_reapplies_every_stored_event() {
        let dispatch = Arc::new(OpDispatch::new(EngineConfig::default()));
        let log = EventLog::new(Arc::clone(&dispatch));
        let writer = EventWriter::new(2, log.clone()).unwrap();

        for _ in 0..3 {
            let entity = Entity::new(EntityDescriptor::new(0, 23), ValueNode::new());
            assert!(writer.write_event(entity).await.is_ok());
        }
        assert_eq!(log.len(), 3);
        log.replay().await.unwrap();
    }
}
