//! Folio Session Management
//!
//! A session is the top-level container of open workbooks. It is created
//! explicitly and lives until the caller drops it; closing a workbook only
//! detaches that workbook.

mod error;
mod session;

pub use error::SessionError;
pub use session::Session;

pub type Result<T> = std::result::Result<T, SessionError>;
