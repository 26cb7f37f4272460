//! Folio Workbooks
//!
//! A workbook is an ordered collection of worksheets with an optional file
//! path and a small lifecycle: it stays `Open` until its session closes it.
//! Worksheets are name-only placeholders owned by exactly one workbook.

mod error;
mod id;
mod state;
mod workbook;
mod worksheet;

pub use error::WorkbookError;
pub use id::{SessionId, WorkbookId, WorksheetId};
pub use state::WorkbookState;
pub use workbook::{Workbook, WorkbookOptions};
pub use worksheet::Worksheet;

pub type Result<T> = std::result::Result<T, WorkbookError>;
