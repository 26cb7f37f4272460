//! Workbook State Machine
//!
//! ```text
//! Open
//!   ↓ close
//! Closed
//! ```
//!
//! A closed workbook has been detached from its session and accepts no
//! further operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkbookState {
    /// Workbook belongs to a session and accepts operations
    Open,
    /// Workbook was detached from its session
    Closed,
}

impl WorkbookState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: WorkbookState) -> bool {
        match (self, target) {
            (WorkbookState::Open, WorkbookState::Closed) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, WorkbookState::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkbookState::Open => "open",
            WorkbookState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for WorkbookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
