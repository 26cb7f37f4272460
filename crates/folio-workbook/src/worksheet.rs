//! Worksheet data structure
//!
//! A worksheet only carries a name. It is created and renamed by its
//! owning workbook.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{WorkbookId, WorksheetId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    id: WorksheetId,
    /// Workbook this worksheet belongs to
    workbook_id: WorkbookId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Worksheet {
    pub(crate) fn new(workbook_id: WorkbookId, name: String) -> Self {
        let now = Utc::now();

        Self {
            id: WorksheetId::new(),
            workbook_id,
            name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> WorksheetId {
        self.id
    }

    pub fn workbook_id(&self) -> WorkbookId {
        self.workbook_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the name, returning the previous one
    pub(crate) fn rename(&mut self, name: String) -> String {
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.name, name)
    }
}
