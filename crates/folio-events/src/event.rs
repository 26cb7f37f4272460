//! Event data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event was recorded
    pub at: DateTime<Utc>,
    /// What happened
    pub kind: EventKind,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    WorkbookCreated {
        workbook_id: String,
        name: String,
    },
    WorkbookOpened {
        workbook_id: String,
        name: String,
        path: Option<String>,
    },
    /// Opening from a path failed; nothing was added to the session
    OpenFailed {
        path: String,
        reason: String,
    },
    WorkbookSaved {
        workbook_id: String,
        path: String,
    },
    WorkbookSavedAs {
        workbook_id: String,
        path: String,
    },
    WorkbookClosed {
        workbook_id: String,
        name: String,
    },
    WorksheetAdded {
        workbook_id: String,
        worksheet_id: String,
        name: String,
    },
    WorksheetDeleted {
        workbook_id: String,
        worksheet_id: String,
        name: String,
    },
    WorksheetRenamed {
        workbook_id: String,
        worksheet_id: String,
        from: String,
        to: String,
    },
    WorksheetActivated {
        workbook_id: String,
        worksheet_id: String,
    },
    WorksheetMoved {
        workbook_id: String,
        worksheet_id: String,
        index: usize,
    },
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::WorkbookCreated { .. } => "workbook_created",
            EventKind::WorkbookOpened { .. } => "workbook_opened",
            EventKind::OpenFailed { .. } => "open_failed",
            EventKind::WorkbookSaved { .. } => "workbook_saved",
            EventKind::WorkbookSavedAs { .. } => "workbook_saved_as",
            EventKind::WorkbookClosed { .. } => "workbook_closed",
            EventKind::WorksheetAdded { .. } => "worksheet_added",
            EventKind::WorksheetDeleted { .. } => "worksheet_deleted",
            EventKind::WorksheetRenamed { .. } => "worksheet_renamed",
            EventKind::WorksheetActivated { .. } => "worksheet_activated",
            EventKind::WorksheetMoved { .. } => "worksheet_moved",
        }
    }

    /// Returns true for events that report a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(self, EventKind::OpenFailed { .. })
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
