//! Public entry points, wiring the dispatcher, the event log, and writers
//! together the way an embedding application would.

use std::sync::Arc;

use eventview_types::{EventEntity, View, ViewDescriptor, ViewExpectation};

use crate::config::EngineConfig;
use crate::dispatch::OpDispatch;
use crate::errors::DispatchError;
use crate::writer::{EventLog, EventWriter, WriteResult};

/// Builds a fresh engine: a dispatcher (owning the worker thread and the
/// store) paired with the event log writers append through.
pub fn make_system(config: EngineConfig) -> (Arc<OpDispatch>, EventLog) {
    let dispatch = Arc::new(OpDispatch::new(config));
    let log = EventLog::new(Arc::clone(&dispatch));
    (dispatch, log)
}

pub fn make_writer(writer_id: u16, log: EventLog) -> Result<EventWriter, DispatchError> {
    EventWriter::new(writer_id, log)
}

/// Submits a read and awaits its result, flattening a dropped-promise failure
/// into the same `DispatchError` a worker-side error would produce.
pub async fn read_view(dispatch: &OpDispatch, view_desc: ViewDescriptor) -> Result<Option<View>, DispatchError> {
    let rx = dispatch.read_view(view_desc)?;
    rx.await.map_err(|_| DispatchError::Poisoned)?
}

/// Writes `entity`, then reads `view_desc` back. Sentinel (`0`) ids in either
/// the entity or the view root are substituted with the freshly assigned
/// event id; an absent expectation is filled in with `(subject, event_id)` so
/// the read is guaranteed to observe this write (read-after-write fence).
pub async fn write_and_read(
    writer: &EventWriter,
    dispatch: &OpDispatch,
    entity: EventEntity,
    mut view_desc: ViewDescriptor,
) -> (WriteResult, Option<View>) {
    let mut subject = entity.descriptor;
    let result = writer.write_event(entity).await;

    let Some(event_id) = result.event_id() else {
        return (result, None);
    };

    if subject.is_unset() {
        subject.id = event_id;
    }
    if view_desc.root.is_unset() {
        view_desc.root.id = event_id;
    }
    if view_desc.expectation.is_none() {
        view_desc.expectation = Some(ViewExpectation { target: subject, at_least: event_id });
    }

    let view = read_view(dispatch, view_desc).await.unwrap_or(None);
    (result, view)
}
