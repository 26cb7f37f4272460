//! Event sinks

use parking_lot::Mutex;
use std::sync::Arc;

use crate::event::{Event, EventKind};

/// Capability for recording lifecycle events
pub trait EventSink: Send + Sync {
    fn record(&self, event: Event);
}

/// Forwards every event to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: Event) {
        if event.kind.is_failure() {
            tracing::warn!(event = %event.kind, detail = ?event.kind, "Workbook operation failed");
        } else {
            tracing::info!(event = %event.kind, detail = ?event.kind, "Workbook event");
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: Event) {}
}

/// Keeps events in memory so callers can inspect them.
///
/// Clones share the same buffer. With a capacity set, the oldest events
/// are dropped once the buffer is full.
pub struct MemorySink {
    events: Arc<Mutex<Vec<Event>>>,
    capacity: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            capacity: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            capacity: Some(capacity),
        }
    }

    /// Snapshot of all recorded events, oldest first
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Snapshot of the recorded event kinds, oldest first
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().iter().map(|e| e.kind.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemorySink {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            capacity: self.capacity,
        }
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: Event) {
        let mut events = self.events.lock();
        events.push(event);

        if let Some(capacity) = self.capacity {
            if events.len() > capacity {
                let overflow = events.len() - capacity;
                events.drain(0..overflow);
            }
        }
    }
}
