//! Workbook error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Workbook is closed: {0}")]
    Closed(String),

    #[error("Workbook has no path to save to: {0}")]
    NoPath(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
