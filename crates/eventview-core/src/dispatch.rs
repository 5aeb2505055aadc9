//! Single-threaded serialization gateway: every write and read is enqueued
//! onto a bounded MPSC ring and applied by one worker thread that owns the
//! store exclusively, so no locks guard it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use eventview_types::{Event, View, ViewDescriptor};
use tokio::sync::oneshot;

use crate::config::EngineConfig;
use crate::errors::DispatchError;
use crate::mpsc::Mpsc;
use crate::publish::Publisher;
use crate::store::EntityStore;
use crate::view_reader::ViewReader;

type WriteResponder = oneshot::Sender<Result<(), DispatchError>>;
type ReadResponder = oneshot::Sender<Result<Option<View>, DispatchError>>;

enum Operation {
    Write(Event, WriteResponder),
    Read(ViewDescriptor, ReadResponder),
}

/// Marks the worker dead when dropped, whether the worker loop returned
/// normally or the thread panicked partway through `process_op`.
struct AliveGuard(Arc<AtomicBool>);

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the MPSC ring and the worker thread's lifetime. Dropping it stops the
/// worker and joins it.
pub struct OpDispatch {
    ring: Arc<Mpsc<Operation>>,
    running: Arc<AtomicBool>,
    alive: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl OpDispatch {
    pub fn new(config: EngineConfig) -> Self {
        let ring = Arc::new(Mpsc::new(config.ring_capacity));
        let running = Arc::new(AtomicBool::new(true));
        let alive = Arc::new(AtomicBool::new(true));

        let worker_ring = Arc::clone(&ring);
        let worker_running = Arc::clone(&running);
        let worker_alive = Arc::clone(&alive);
        let backoff = config.idle_backoff;

        let worker = thread::spawn(move || {
            let _guard = AliveGuard(worker_alive);
            log::info!("eventview dispatcher worker starting");
            let mut store = EntityStore::new();
            let publisher = Publisher::new();
            let reader = ViewReader::new();

            while worker_running.load(Ordering::Acquire) {
                match worker_ring.consume() {
                    Some(op) => Self::process_op(&mut store, &publisher, &reader, op),
                    None => thread::sleep(backoff),
                }
            }
            log::info!("eventview dispatcher worker stopping");
        });

        Self { ring, running, alive, worker: Some(worker) }
    }

    fn process_op(store: &mut EntityStore, publisher: &Publisher, reader: &ViewReader, op: Operation) {
        match op {
            Operation::Write(event, respond) => {
                publisher.publish(store, &event);
                if respond.send(Ok(())).is_err() {
                    log::warn!("write promise dropped before being observed (event_id={})", event.id);
                }
            }
            Operation::Read(view_desc, respond) => {
                let result = reader.read_view(store, &view_desc);
                if respond.send(result).is_err() {
                    log::warn!("read promise dropped before being observed");
                }
            }
        }
    }

    /// Enqueues a write; the returned receiver resolves once the worker has
    /// applied it. Resolves to `Err` only if the worker dropped the promise.
    pub fn publish_event(&self, event: Event) -> Result<oneshot::Receiver<Result<(), DispatchError>>, DispatchError> {
        if !self.alive.load(Ordering::Acquire) {
            return Err(DispatchError::WorkerUnavailable);
        }
        let (tx, rx) = oneshot::channel();
        self.ring.produce(Operation::Write(event, tx)).map_err(|_| DispatchError::QueueFull)?;
        Ok(rx)
    }

    /// Enqueues a read; the returned receiver resolves to the materialized
    /// view (or `None` if absent / the expectation fence was not met).
    pub fn read_view(&self, view_desc: ViewDescriptor) -> Result<oneshot::Receiver<Result<Option<View>, DispatchError>>, DispatchError> {
        if !self.alive.load(Ordering::Acquire) {
            return Err(DispatchError::WorkerUnavailable);
        }
        let (tx, rx) = oneshot::channel();
        self.ring.produce(Operation::Read(view_desc, tx)).map_err(|_| DispatchError::QueueFull)?;
        Ok(rx)
    }
}

impl Drop for OpDispatch {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
