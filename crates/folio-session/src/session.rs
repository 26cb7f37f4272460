//! Session
//!
//! Owns workbooks in open/create order. Workbooks receive the session's
//! event sink and options when they are constructed.

use std::path::Path;
use std::sync::Arc;

use folio_events::{Event, EventKind, EventSink};
use folio_workbook::{SessionId, Workbook, WorkbookId, WorkbookOptions};

use crate::error::SessionError;
use crate::Result;

pub struct Session {
    id: SessionId,
    /// Open workbooks, in the order they were opened or created
    workbooks: Vec<Workbook>,
    options: WorkbookOptions,
    sink: Arc<dyn EventSink>,
}

impl Session {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_options(sink, WorkbookOptions::default())
    }

    pub fn with_options(sink: Arc<dyn EventSink>, options: WorkbookOptions) -> Self {
        Self {
            id: SessionId::new(),
            workbooks: Vec::new(),
            options,
            sink,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn options(&self) -> WorkbookOptions {
        self.options
    }

    pub fn workbooks(&self) -> &[Workbook] {
        &self.workbooks
    }

    pub fn workbook_count(&self) -> usize {
        self.workbooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workbooks.is_empty()
    }

    pub fn workbook(&self, id: WorkbookId) -> Result<&Workbook> {
        self.workbooks
            .iter()
            .find(|w| w.id() == id)
            .ok_or_else(|| SessionError::WorkbookNotFound(id.to_string()))
    }

    pub fn workbook_mut(&mut self, id: WorkbookId) -> Result<&mut Workbook> {
        self.workbooks
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| SessionError::WorkbookNotFound(id.to_string()))
    }

    /// First open workbook with the given name
    pub fn find_workbook(&self, name: &str) -> Option<&Workbook> {
        self.workbooks.iter().find(|w| w.name() == name)
    }

    /// Open the workbook stored at `path`.
    ///
    /// Only the existence of the file is checked; its content is not read.
    /// On failure nothing is added to the session.
    pub fn open_workbook(&mut self, path: impl AsRef<Path>) -> Result<&mut Workbook> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().into_owned();

        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                self.emit(EventKind::OpenFailed {
                    path: path_str.clone(),
                    reason: "file not found".to_string(),
                });
                return Err(SessionError::NotFound(path_str));
            }
            Err(source) => {
                self.emit(EventKind::OpenFailed {
                    path: path_str.clone(),
                    reason: source.to_string(),
                });
                return Err(SessionError::Io {
                    path: path_str,
                    source,
                });
            }
        }

        if !path.is_file() {
            self.emit(EventKind::OpenFailed {
                path: path_str.clone(),
                reason: "not a file".to_string(),
            });
            return Err(SessionError::NotAFile(path_str));
        }

        let mut workbook =
            Workbook::from_path(self.id, path, Arc::clone(&self.sink), self.options);
        workbook.open()?;

        tracing::info!(
            session_id = %self.id,
            workbook_id = %workbook.id(),
            path = %path_str,
            "Opened workbook"
        );

        Ok(self.attach(workbook))
    }

    /// Create a workbook that is not bound to a path. Any name is accepted.
    pub fn create_workbook(&mut self, name: impl Into<String>) -> &mut Workbook {
        let workbook = Workbook::new(self.id, name, Arc::clone(&self.sink), self.options);

        self.emit(EventKind::WorkbookCreated {
            workbook_id: workbook.id().to_string(),
            name: workbook.name().to_string(),
        });

        tracing::info!(
            session_id = %self.id,
            workbook_id = %workbook.id(),
            "Created new workbook"
        );

        self.attach(workbook)
    }

    /// Close a workbook, detach it from the session and hand it back.
    ///
    /// The returned workbook is `Closed` and rejects further operations.
    /// A workbook that was already closed in place is still detached and
    /// reported as closed.
    pub fn close_workbook(&mut self, id: WorkbookId) -> Result<Workbook> {
        let index = self
            .workbooks
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| SessionError::WorkbookNotFound(id.to_string()))?;

        self.close_at(index)?;
        let workbook = self.workbooks.remove(index);

        tracing::info!(session_id = %self.id, workbook_id = %id, "Closed workbook");

        Ok(workbook)
    }

    /// Close every workbook, most recently opened first
    pub fn close_all(&mut self) -> Result<Vec<Workbook>> {
        for index in (0..self.workbooks.len()).rev() {
            self.close_at(index)?;
        }

        let closed: Vec<Workbook> = self.workbooks.drain(..).rev().collect();

        tracing::info!(session_id = %self.id, count = closed.len(), "Closed all workbooks");

        Ok(closed)
    }

    fn close_at(&mut self, index: usize) -> Result<()> {
        let workbook = &mut self.workbooks[index];

        if workbook.is_closed() {
            let kind = EventKind::WorkbookClosed {
                workbook_id: workbook.id().to_string(),
                name: workbook.name().to_string(),
            };
            self.emit(kind);
        } else {
            workbook.close()?;
        }

        Ok(())
    }

    fn attach(&mut self, workbook: Workbook) -> &mut Workbook {
        self.workbooks.push(workbook);
        let index = self.workbooks.len() - 1;
        &mut self.workbooks[index]
    }

    fn emit(&self, kind: EventKind) {
        self.sink.record(Event::new(kind));
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("workbooks", &self.workbooks)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_events::MemorySink;
    use folio_workbook::{WorkbookError, WorkbookState};
    use std::fs::File;

    fn session() -> (Session, MemorySink) {
        let sink = MemorySink::new();
        (Session::new(Arc::new(sink.clone())), sink)
    }

    #[test]
    fn test_open_missing_path() {
        let (mut session, sink) = session();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.xlsx");

        let result = session.open_workbook(&missing);
        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert!(session.is_empty());

        assert!(matches!(
            sink.kinds().as_slice(),
            [EventKind::OpenFailed { .. }]
        ));
    }

    #[test]
    fn test_open_directory_is_rejected() {
        let (mut session, _) = session();
        let dir = tempfile::tempdir().unwrap();

        let result = session.open_workbook(dir.path());
        assert!(matches!(result, Err(SessionError::NotAFile(_))));
        assert_eq!(session.workbook_count(), 0);
    }

    #[test]
    fn test_open_existing_file() {
        let (mut session, sink) = session();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        File::create(&path).unwrap();

        let workbook = session.open_workbook(&path).unwrap();
        assert_eq!(workbook.name(), "report.xlsx");
        assert_eq!(workbook.path(), Some(path.as_path()));
        let id = workbook.id();
        let session_id = workbook.session_id();

        assert_eq!(session_id, session.id());
        assert_eq!(session.workbook_count(), 1);
        assert_eq!(session.workbooks()[0].id(), id);
        assert!(matches!(
            sink.kinds().as_slice(),
            [EventKind::WorkbookOpened { .. }]
        ));
    }

    #[test]
    fn test_create_workbook() {
        let (mut session, _) = session();
        let workbook = session.create_workbook("Budget");
        assert_eq!(workbook.name(), "Budget");
        assert!(workbook.path().is_none());
        assert_eq!(session.workbook_count(), 1);

        // Empty and duplicate names are accepted
        session.create_workbook("");
        session.create_workbook("Budget");
        assert_eq!(session.workbook_count(), 3);
        let names: Vec<&str> = session.workbooks().iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["Budget", "", "Budget"]);
    }

    #[test]
    fn test_close_workbook_removes_exactly_that_entry() {
        let (mut session, _) = session();
        let first = session.create_workbook("A").id();
        let second = session.create_workbook("B").id();
        let third = session.create_workbook("C").id();

        let closed = session.close_workbook(second).unwrap();
        assert_eq!(closed.id(), second);
        assert_eq!(closed.state(), WorkbookState::Closed);
        assert_eq!(session.workbook_count(), 2);
        assert!(session.workbook(second).is_err());

        let remaining: Vec<WorkbookId> = session.workbooks().iter().map(|w| w.id()).collect();
        assert_eq!(remaining, vec![first, third]);
    }

    #[test]
    fn test_closed_workbook_rejects_operations() {
        let (mut session, _) = session();
        let id = session.create_workbook("Budget").id();

        let mut closed = session.close_workbook(id).unwrap();
        assert!(matches!(
            closed.add_worksheet("Sheet1"),
            Err(WorkbookError::Closed(_))
        ));
    }

    #[test]
    fn test_close_unknown_workbook() {
        let (mut session, _) = session();
        let id = session.create_workbook("Budget").id();
        session.close_workbook(id).unwrap();

        let result = session.close_workbook(id);
        assert!(matches!(result, Err(SessionError::WorkbookNotFound(_))));
        assert!(session.is_empty());
    }

    #[test]
    fn test_worksheet_operations_through_session() {
        let (mut session, _) = session();
        let id = session.create_workbook("Budget").id();

        let workbook = session.workbook_mut(id).unwrap();
        let sheet = workbook.add_worksheet("Sheet1").unwrap().id();
        workbook.rename_worksheet(sheet, "Sheet1-Renamed").unwrap();

        let workbook = session.workbook(id).unwrap();
        assert_eq!(workbook.worksheets()[0].name(), "Sheet1-Renamed");
        assert_eq!(session.find_workbook("Budget").unwrap().id(), id);
    }

    #[test]
    fn test_options_reach_workbooks() {
        let options = WorkbookOptions {
            activate_first_worksheet: true,
        };
        let mut session = Session::with_options(Arc::new(MemorySink::new()), options);

        let workbook = session.create_workbook("Budget");
        let sheet = workbook.add_worksheet("Sheet1").unwrap().id();
        assert_eq!(workbook.active_worksheet().unwrap().id(), sheet);
    }

    #[test]
    fn test_close_all() {
        let (mut session, sink) = session();
        session.create_workbook("A");
        session.create_workbook("B");
        sink.clear();

        let closed = session.close_all().unwrap();
        assert!(session.is_empty());
        let names: Vec<&str> = closed.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(sink.len(), 2);
        assert!(closed.iter().all(|w| w.is_closed()));
    }

    #[test]
    fn test_close_workbook_already_closed_in_place() {
        let (mut session, sink) = session();
        let id = session.create_workbook("Budget").id();

        session.workbook_mut(id).unwrap().close().unwrap();
        assert_eq!(session.workbook_count(), 1);
        sink.clear();

        let closed = session.close_workbook(id).unwrap();
        assert!(closed.is_closed());
        assert!(session.is_empty());
        assert_eq!(
            sink.kinds(),
            vec![EventKind::WorkbookClosed {
                workbook_id: id.to_string(),
                name: "Budget".to_string(),
            }]
        );
    }

    #[test]
    fn test_close_all_reports_workbooks_closed_in_place() {
        let (mut session, sink) = session();
        let a = session.create_workbook("A").id();
        session.create_workbook("B");
        session.workbook_mut(a).unwrap().close().unwrap();
        sink.clear();

        let closed = session.close_all().unwrap();
        assert_eq!(closed.len(), 2);
        assert!(session.is_empty());
        let names: Vec<&str> = sink.kinds().iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["workbook_closed", "workbook_closed"]);
    }

    #[test]
    fn test_open_inaccessible_path_reports_io_error() {
        let (mut session, sink) = session();
        let file = tempfile::NamedTempFile::new().unwrap();
        // A regular file cannot have children
        let path = file.path().join("child.xlsx");

        let result = session.open_workbook(&path);
        assert!(matches!(result, Err(SessionError::Io { .. })));
        assert!(session.is_empty());
        assert!(matches!(
            sink.kinds().as_slice(),
            [EventKind::OpenFailed { .. }]
        ));
    }
}
