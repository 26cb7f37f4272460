//! Folio Event Recording
//!
//! Lifecycle operations on sessions, workbooks and worksheets report what
//! they did through an injected [`EventSink`] instead of printing.
//! Tests plug in a [`MemorySink`]; applications forward to `tracing`.

mod event;
mod sink;

pub use event::{Event, EventKind};
pub use sink::{EventSink, MemorySink, NullSink, TracingSink};
