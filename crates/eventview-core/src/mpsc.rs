//! A bounded, lock-free, multi-producer/single-consumer ring buffer.
//!
//! Reservation happens via a CAS on `write_idx`; the reserving producer then
//! stores its payload and advances `max_read_idx` in strict reservation
//! order, so the consumer never observes a slot before its producer has
//! finished writing into it, even though producers may publish out of CAS
//! order relative to each other.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct Mpsc<T> {
    capacity: usize,
    buffer: Vec<UnsafeCell<Option<T>>>,
    write_idx: AtomicUsize,
    read_idx: AtomicUsize,
    max_read_idx: AtomicUsize,
}

unsafe impl<T: Send> Send for Mpsc<T> {}
unsafe impl<T: Send> Sync for Mpsc<T> {}

impl<T> Mpsc<T> {
    /// `capacity` slots are allocated; `capacity - 1` are usable at once (one
    /// slot always separates `write_idx` from `read_idx` so "full" and
    /// "empty" are distinguishable).
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "mpsc capacity must allow at least one usable slot");
        let buffer = (0..capacity).map(|_| UnsafeCell::new(None)).collect();
        Self {
            capacity,
            buffer,
            write_idx: AtomicUsize::new(0),
            read_idx: AtomicUsize::new(0),
            max_read_idx: AtomicUsize::new(0),
        }
    }

    /// Attempts to enqueue `elem`. Returns it back on failure (ring full).
    pub fn produce(&self, elem: T) -> Result<(), T> {
        loop {
            let w = self.write_idx.load(Ordering::Acquire);
            let r = self.read_idx.load(Ordering::Acquire);

            if (w + 1) % self.capacity == r % self.capacity {
                return Err(elem);
            }

            if self.write_idx.compare_exchange_weak(w, w + 1, Ordering::AcqRel, Ordering::Acquire).is_ok() {
                unsafe {
                    *self.buffer[w % self.capacity].get() = Some(elem);
                }

                // Publish in strict reservation order: wait until it is our turn.
                while self
                    .max_read_idx
                    .compare_exchange_weak(w, w + 1, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    std::thread::yield_now();
                }
                return Ok(());
            }
        }
    }

    /// Pops the oldest published element, or `None` if nothing is published yet.
    /// Only safe to call from a single consumer thread.
    pub fn consume(&self) -> Option<T> {
        let r = self.read_idx.load(Ordering::Acquire);
        let max_r = self.max_read_idx.load(Ordering::Acquire);
        if r == max_r {
            return None;
        }

        let slot = unsafe { &mut *self.buffer[r % self.capacity].get() };
        let elem = slot.take().expect("a slot below max_read_idx is always populated");
        self.read_idx.store(r + 1, Ordering::Release);
        Some(elem)
    }

    pub fn is_empty(&self) -> bool {
        self.read_idx.load(Ordering::Acquire) == self.max_read_idx.load(Ordering::Acquire)
    }
}
