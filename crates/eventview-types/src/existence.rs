use serde::{Deserialize, Serialize};

use crate::descriptor::EventId;

/// Two-timestamp liveness gate. A referent is live iff `add_time > remove_time`.
///
/// `touch`/`deref` are max-merges, so applying the same or an older event twice
/// is a no-op and out-of-order application converges to the same state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Existence {
    pub add_time: EventId,
    pub remove_time: EventId,
}

impl Existence {
    pub fn new(add_time: EventId, remove_time: EventId) -> Self {
        Self { add_time, remove_time }
    }

    pub fn exists(&self) -> bool {
        self.add_time > self.remove_time
    }

    pub fn touch(&mut self, at: EventId) {
        self.add_time = self.add_time.max(at);
    }

    pub fn deref(&mut self, at: EventId) {
        self.remove_time = self.remove_time.max(at);
    }
}
