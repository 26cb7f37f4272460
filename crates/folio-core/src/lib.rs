//! Folio Core
//!
//! Entry point for applications: configuration, logging bootstrap and
//! session construction. Re-exports the public surface of the other crates.

mod config;
mod error;

use std::sync::Arc;

pub use config::Config;
pub use error::CoreError;

pub use folio_events::{Event, EventKind, EventSink, MemorySink, NullSink, TracingSink};
pub use folio_session::{Session, SessionError};
pub use folio_workbook::{
    SessionId, Workbook, WorkbookError, WorkbookId, WorkbookOptions, WorkbookState, Worksheet,
    WorksheetId,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if fmt().with_env_filter(filter).with_target(true).try_init().is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// Start a session whose events are forwarded to `tracing`
pub fn new_session(config: &Config) -> Session {
    Session::with_options(Arc::new(TracingSink), config.workbook_options())
}

/// Start a session whose events are kept in memory.
///
/// The returned sink shares its buffer with the session.
pub fn new_recording_session(config: &Config) -> Result<(Session, MemorySink)> {
    config.validate()?;

    let sink = match config.event_capacity {
        Some(capacity) => MemorySink::with_capacity(capacity),
        None => MemorySink::new(),
    };
    let session = Session::with_options(Arc::new(sink.clone()), config.workbook_options());
    Ok((session, sink))
}
