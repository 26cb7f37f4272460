//! Folio configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use folio_workbook::WorkbookOptions;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Activate the first worksheet added to a workbook
    pub activate_first_worksheet: bool,
    /// Maximum number of events kept by a recording session
    pub event_capacity: Option<usize>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn workbook_options(&self) -> WorkbookOptions {
        WorkbookOptions {
            activate_first_worksheet: self.activate_first_worksheet,
        }
    }

    /// Reject values that would make a session misbehave
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CoreError::Config("log_filter cannot be empty".to_string()));
        }
        if self.event_capacity == Some(0) {
            return Err(CoreError::Config(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            activate_first_worksheet: false,
            event_capacity: None,
        }
    }
}
