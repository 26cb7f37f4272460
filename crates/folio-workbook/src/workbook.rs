//! Workbook
//!
//! Owns an ordered list of worksheets. Every operation reports through the
//! event sink handed down by the owning session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_events::{Event, EventKind, EventSink};

use crate::error::WorkbookError;
use crate::id::{SessionId, WorkbookId, WorksheetId};
use crate::state::WorkbookState;
use crate::worksheet::Worksheet;
use crate::Result;

/// Behaviour switches shared by all workbooks of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookOptions {
    /// Activate the first worksheet added while none is active
    #[serde(default)]
    pub activate_first_worksheet: bool,
}

pub struct Workbook {
    id: WorkbookId,
    /// Session this workbook belongs to
    session_id: SessionId,
    name: String,
    /// Location the workbook was opened from or last saved to
    path: Option<PathBuf>,
    worksheets: Vec<Worksheet>,
    active_worksheet: Option<WorksheetId>,
    state: WorkbookState,
    /// Structural changes since the last save
    dirty: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    options: WorkbookOptions,
    sink: Arc<dyn EventSink>,
}

impl Workbook {
    /// Create a workbook that is not bound to any path
    pub fn new(
        session_id: SessionId,
        name: impl Into<String>,
        sink: Arc<dyn EventSink>,
        options: WorkbookOptions,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: WorkbookId::new(),
            session_id,
            name: name.into(),
            path: None,
            worksheets: Vec::new(),
            active_worksheet: None,
            state: WorkbookState::Open,
            dirty: false,
            created_at: now,
            updated_at: now,
            options,
            sink,
        }
    }

    /// Create a workbook bound to `path`, named after its final segment
    pub fn from_path(
        session_id: SessionId,
        path: impl Into<PathBuf>,
        sink: Arc<dyn EventSink>,
        options: WorkbookOptions,
    ) -> Self {
        let path = path.into();
        let name = name_from_path(&path);
        let mut workbook = Self::new(session_id, name, sink, options);
        workbook.path = Some(path);
        workbook
    }

    pub fn id(&self) -> WorkbookId {
        self.id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> WorkbookState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn options(&self) -> WorkbookOptions {
        self.options
    }

    // === Lifecycle ===

    /// Announce that the workbook was opened. No content is read.
    pub fn open(&mut self) -> Result<()> {
        self.ensure_open()?;

        self.emit(EventKind::WorkbookOpened {
            workbook_id: self.id.to_string(),
            name: self.name.clone(),
            path: self.path_string(),
        });

        Ok(())
    }

    /// Save to the current path. No content is written.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_open()?;

        let path = self
            .path_string()
            .ok_or_else(|| WorkbookError::NoPath(self.name.clone()))?;

        self.dirty = false;
        self.touch();
        self.emit(EventKind::WorkbookSaved {
            workbook_id: self.id.to_string(),
            path,
        });

        Ok(())
    }

    /// Rebind the workbook to `path` and save there
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.ensure_open()?;

        let path = path.into();
        let display = path.to_string_lossy().into_owned();
        self.path = Some(path);
        self.dirty = false;
        self.touch();

        self.emit(EventKind::WorkbookSavedAs {
            workbook_id: self.id.to_string(),
            path: display,
        });

        Ok(())
    }

    /// Close the workbook. Detaching it from the session is the caller's job.
    pub fn close(&mut self) -> Result<()> {
        if self.state.is_closed() {
            return Ok(());
        }

        self.transition_to(WorkbookState::Closed)?;
        self.emit(EventKind::WorkbookClosed {
            workbook_id: self.id.to_string(),
            name: self.name.clone(),
        });

        Ok(())
    }

    /// Attempt to transition to a new state
    fn transition_to(&mut self, new_state: WorkbookState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(WorkbookError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            workbook_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Workbook state transition"
        );

        self.state = new_state;
        self.touch();

        Ok(())
    }

    // === Worksheets ===

    pub fn worksheets(&self) -> &[Worksheet] {
        &self.worksheets
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn worksheet(&self, id: WorksheetId) -> Option<&Worksheet> {
        self.worksheets.iter().find(|s| s.id() == id)
    }

    /// First worksheet with the given name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|s| s.name() == name)
    }

    pub fn worksheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|s| s.name()).collect()
    }

    pub fn position(&self, id: WorksheetId) -> Option<usize> {
        self.worksheets.iter().position(|s| s.id() == id)
    }

    pub fn active_worksheet(&self) -> Option<&Worksheet> {
        self.active_worksheet.and_then(|id| self.worksheet(id))
    }

    /// Append a worksheet. Duplicate names are allowed.
    pub fn add_worksheet(&mut self, name: impl Into<String>) -> Result<&Worksheet> {
        self.ensure_open()?;

        let sheet = Worksheet::new(self.id, name.into());
        let sheet_id = sheet.id();

        self.emit(EventKind::WorksheetAdded {
            workbook_id: self.id.to_string(),
            worksheet_id: sheet_id.to_string(),
            name: sheet.name().to_string(),
        });

        self.worksheets.push(sheet);
        self.mark_dirty();

        if self.options.activate_first_worksheet && self.active_worksheet.is_none() {
            self.active_worksheet = Some(sheet_id);
        }

        let index = self.worksheets.len() - 1;
        Ok(&self.worksheets[index])
    }

    /// Remove a worksheet and hand it back
    pub fn delete_worksheet(&mut self, id: WorksheetId) -> Result<Worksheet> {
        self.ensure_open()?;

        let index = self.require_position(id)?;
        let sheet = self.worksheets.remove(index);

        // Fall back to the sheet that took its place, else the new last one
        if self.active_worksheet == Some(id) {
            self.active_worksheet = self
                .worksheets
                .get(index)
                .or_else(|| self.worksheets.last())
                .map(|s| s.id());
        }

        self.mark_dirty();
        self.emit(EventKind::WorksheetDeleted {
            workbook_id: self.id.to_string(),
            worksheet_id: id.to_string(),
            name: sheet.name().to_string(),
        });

        Ok(sheet)
    }

    /// Rename in place. Names are not checked for uniqueness.
    pub fn rename_worksheet(
        &mut self,
        id: WorksheetId,
        new_name: impl Into<String>,
    ) -> Result<&Worksheet> {
        self.ensure_open()?;

        let index = self.require_position(id)?;
        let new_name = new_name.into();
        let previous = self.worksheets[index].rename(new_name.clone());

        self.mark_dirty();
        self.emit(EventKind::WorksheetRenamed {
            workbook_id: self.id.to_string(),
            worksheet_id: id.to_string(),
            from: previous,
            to: new_name,
        });

        Ok(&self.worksheets[index])
    }

    pub fn activate_worksheet(&mut self, id: WorksheetId) -> Result<()> {
        self.ensure_open()?;
        self.require_position(id)?;

        self.active_worksheet = Some(id);
        self.touch();
        self.emit(EventKind::WorksheetActivated {
            workbook_id: self.id.to_string(),
            worksheet_id: id.to_string(),
        });

        Ok(())
    }

    /// Move a worksheet to a new position, clamped to the end
    pub fn move_worksheet(&mut self, id: WorksheetId, new_index: usize) -> Result<()> {
        self.ensure_open()?;

        let current_index = self.require_position(id)?;
        let sheet = self.worksheets.remove(current_index);
        let insert_index = new_index.min(self.worksheets.len());
        self.worksheets.insert(insert_index, sheet);

        self.mark_dirty();
        self.emit(EventKind::WorksheetMoved {
            workbook_id: self.id.to_string(),
            worksheet_id: id.to_string(),
            index: insert_index,
        });

        Ok(())
    }

    // === Internals ===

    fn ensure_open(&self) -> Result<()> {
        if self.state.is_closed() {
            return Err(WorkbookError::Closed(self.name.clone()));
        }
        Ok(())
    }

    fn require_position(&self, id: WorksheetId) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| WorkbookError::WorksheetNotFound(id.to_string()))
    }

    fn path_string(&self) -> Option<String> {
        self.path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn emit(&self, kind: EventKind) {
        self.sink.record(Event::new(kind));
    }
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("id", &self.id)
            .field("session_id", &self.session_id)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("worksheets", &self.worksheets)
            .field("active_worksheet", &self.active_worksheet)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

/// Final path segment, or the whole path when it has none
fn name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
