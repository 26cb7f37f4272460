//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Cannot access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Workbook not found: {0}")]
    WorkbookNotFound(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] folio_workbook::WorkbookError),
}
