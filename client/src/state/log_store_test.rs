use std::cell::RefCell;

use futures::executor::block_on;

use super::*;
use crate::net::types::{LogEntry, LogSummary, RiskLevel, UploadResponse};
use crate::state::toasts::ToastKind;

// =============================================================
// Fakes
// =============================================================

#[derive(Default)]
struct FakeBackend {
    logs: Vec<LogSummary>,
    search_hits: Vec<LogSummary>,
    record: Option<MaintenanceLog>,
    upload: Option<UploadResponse>,
    export_bytes: Vec<u8>,
    fail: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.fail { Err(ApiError::Status { status: 500 }) } else { Ok(()) }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl LogBackend for FakeBackend {
    async fn list_logs(&self) -> Result<Vec<LogSummary>, ApiError> {
        self.record("list".to_owned())?;
        Ok(self.logs.clone())
    }

    async fn get_log(&self, id: &str) -> Result<MaintenanceLog, ApiError> {
        self.record(format!("get {id}"))?;
        self.record.clone().ok_or(ApiError::Status { status: 404 })
    }

    async fn search_logs(&self, registration: &str) -> Result<Vec<LogSummary>, ApiError> {
        self.record(format!("search {registration}"))?;
        Ok(self.search_hits.clone())
    }

    async fn upload_log(&self, file: &UploadFile) -> Result<UploadResponse, ApiError> {
        self.record(format!("upload {}", file.name))?;
        self.upload.clone().ok_or_else(|| ApiError::Decode("no response".to_owned()))
    }

    async fn update_log(&self, id: &str, data: &MaintenanceLogData) -> Result<MaintenanceLog, ApiError> {
        self.record(format!("update {id}"))?;
        let mut log = self.record.clone().ok_or(ApiError::Status { status: 404 })?;
        log.structured_data = data.clone();
        Ok(log)
    }

    async fn delete_log(&self, id: &str) -> Result<(), ApiError> {
        self.record(format!("delete {id}"))
    }

    async fn export_log(&self, id: &str, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        self.record(format!("export {id} {}", format.extension()))?;
        Ok(self.export_bytes.clone())
    }
}

/// Applies actions to a local state and records every effect.
#[derive(Default)]
struct Recorder {
    state: RefCell<LogsState>,
    actions: RefCell<Vec<LogAction>>,
    notices: RefCell<Vec<Notice>>,
    files: RefCell<Vec<(String, String, Vec<u8>)>>,
}

impl Recorder {
    fn with_state(state: LogsState) -> Self {
        Self { state: RefCell::new(state), ..Self::default() }
    }

    fn state(&self) -> LogsState {
        self.state.borrow().clone()
    }

    fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl StoreEffects for &Recorder {
    fn dispatch(&self, action: LogAction) {
        self.actions.borrow_mut().push(action.clone());
        self.state.borrow_mut().apply(action);
    }

    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn save_file(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) {
        self.files.borrow_mut().push((file_name.to_owned(), mime_type.to_owned(), bytes));
    }
}

// =============================================================
// Helpers
// =============================================================

fn summary(id: &str) -> LogSummary {
    LogSummary {
        id: id.to_owned(),
        aircraft_registration: Some("N123AB".to_owned()),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        description: Some("Annual inspection".to_owned()),
        risk_level: Some(RiskLevel::Low),
    }
}

fn log_record(id: &str) -> MaintenanceLog {
    MaintenanceLog {
        id: id.to_owned(),
        uploaded_by: "anonymous".to_owned(),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        image_filename: Some("scan.png".to_owned()),
        original_image_url: None,
        structured_data: MaintenanceLogData {
            aircraft_registration: Some("N123AB".to_owned()),
            log_entries: vec![LogEntry {
                description_of_work_performed: Some("Annual inspection".to_owned()),
                ..LogEntry::default()
            }],
            ..MaintenanceLogData::default()
        },
    }
}

fn image() -> UploadFile {
    UploadFile { name: "scan.png".to_owned(), content_type: "image/png".to_owned(), bytes: vec![1, 2, 3] }
}

fn accepted(id: &str) -> UploadResponse {
    UploadResponse {
        success: true,
        message: "Maintenance log processed successfully".to_owned(),
        log_id: Some(id.to_owned()),
        structured_data: None,
    }
}

// =============================================================
// fetch_all / fetch_one
// =============================================================

#[test]
fn fetch_all_replaces_list_and_ends_loading() {
    let backend = FakeBackend { logs: vec![summary("a"), summary("b")], ..FakeBackend::default() };
    let recorder = Recorder::with_state(LogsState { logs: vec![summary("old")], ..LogsState::default() });
    let store = LogStore::new(backend, &recorder);

    assert!(block_on(store.fetch_all()).is_ok());

    let state = recorder.state();
    assert_eq!(state.logs.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(!state.loading);
    assert_eq!(recorder.actions.borrow()[0], LogAction::SetLoading(true));
}

#[test]
fn fetch_all_failure_sets_error_and_toasts() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    let err = block_on(store.fetch_all()).unwrap_err();
    assert_eq!(err, ApiError::Status { status: 500 });

    let state = recorder.state();
    assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    assert!(!state.loading);
    assert_eq!(recorder.notices(), vec![Notice::error(FETCH_FAILED)]);
}

#[test]
fn fetch_one_selects_record() {
    let backend = FakeBackend { record: Some(log_record("a")), ..FakeBackend::default() };
    let recorder = Recorder::default();
    let store = LogStore::new(backend, &recorder);

    block_on(store.fetch_one("a")).unwrap();

    assert!(recorder.state().is_current("a"));
    assert_eq!(store.backend().calls(), vec!["get a"]);
}

#[test]
fn fetch_one_failure_reports_load_error() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    assert!(block_on(store.fetch_one("a")).is_err());
    assert_eq!(recorder.state().error.as_deref(), Some(LOAD_FAILED));
    assert!(recorder.state().current.is_none());
}

// =============================================================
// upload
// =============================================================

#[test]
fn upload_raises_flags_then_adds_selects_and_refreshes() {
    let backend = FakeBackend {
        upload: Some(accepted("new")),
        record: Some(log_record("new")),
        logs: vec![summary("new"), summary("a")],
        ..FakeBackend::default()
    };
    let recorder = Recorder::with_state(LogsState { logs: vec![summary("a")], ..LogsState::default() });
    let store = LogStore::new(backend, &recorder);

    let log = block_on(store.upload(&image())).unwrap();
    assert_eq!(log.id, "new");

    let actions = recorder.actions.borrow().clone();
    assert_eq!(actions[0], LogAction::SetUploading(true));
    assert_eq!(actions[1], LogAction::SetAnalyzing(true));

    let state = recorder.state();
    assert!(!state.busy());
    assert!(state.is_current("new"));
    assert_eq!(state.logs[0].id, "new");
    assert_eq!(store.backend().calls(), vec!["upload scan.png", "get new", "list"]);
    assert_eq!(recorder.notices(), vec![Notice::success(UPLOAD_SUCCEEDED)]);
}

#[test]
fn upload_rejected_by_backend_clears_flags() {
    let backend = FakeBackend {
        upload: Some(UploadResponse {
            success: false,
            message: "Could not read image".to_owned(),
            log_id: None,
            structured_data: None,
        }),
        ..FakeBackend::default()
    };
    let recorder = Recorder::default();
    let store = LogStore::new(backend, &recorder);

    let err = block_on(store.upload(&image())).unwrap_err();
    assert_eq!(err, ApiError::Rejected("Could not read image".to_owned()));

    let state = recorder.state();
    assert!(!state.uploading);
    assert!(!state.analyzing);
    assert_eq!(state.error.as_deref(), Some(UPLOAD_FAILED));
    assert_eq!(recorder.notices(), vec![Notice::error(UPLOAD_FAILED)]);
    assert_eq!(store.backend().calls(), vec!["upload scan.png"]);
}

#[test]
fn upload_transport_failure_clears_flags() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    assert!(block_on(store.upload(&image())).is_err());
    assert!(!recorder.state().busy());
    assert!(recorder.state().logs.is_empty());
}

#[test]
fn upload_without_log_id_is_a_decode_error() {
    let mut response = accepted("x");
    response.log_id = None;
    let backend = FakeBackend { upload: Some(response), ..FakeBackend::default() };
    let recorder = Recorder::default();
    let store = LogStore::new(backend, &recorder);

    let err = block_on(store.upload(&image())).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(!recorder.state().busy());
}

// =============================================================
// update / remove
// =============================================================

#[test]
fn update_replaces_current_with_server_copy() {
    let backend = FakeBackend {
        record: Some(log_record("a")),
        logs: vec![summary("a")],
        ..FakeBackend::default()
    };
    let recorder = Recorder::with_state(LogsState {
        logs: vec![summary("a")],
        current: Some(log_record("a")),
        ..LogsState::default()
    });
    let store = LogStore::new(backend, &recorder);

    let mut data = log_record("a").structured_data;
    data.aircraft_registration = Some("N999ZZ".to_owned());
    let saved = block_on(store.update("a", &data)).unwrap();

    assert_eq!(saved.aircraft_registration(), Some("N999ZZ"));
    let state = recorder.state();
    assert_eq!(state.current.as_ref().and_then(MaintenanceLog::aircraft_registration), Some("N999ZZ"));
    assert_eq!(recorder.notices(), vec![Notice::success(UPDATE_SUCCEEDED)]);
}

#[test]
fn update_failure_leaves_record_untouched() {
    let recorder = Recorder::with_state(LogsState { current: Some(log_record("a")), ..LogsState::default() });
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    let mut data = log_record("a").structured_data;
    data.aircraft_registration = Some("N999ZZ".to_owned());
    assert!(block_on(store.update("a", &data)).is_err());

    let state = recorder.state();
    assert_eq!(state.current, Some(log_record("a")));
    assert_eq!(state.error.as_deref(), Some(UPDATE_FAILED));
}

#[test]
fn remove_drops_record_and_clears_selection() {
    let recorder = Recorder::with_state(LogsState {
        logs: vec![summary("a"), summary("b")],
        current: Some(log_record("a")),
        ..LogsState::default()
    });
    let store = LogStore::new(FakeBackend::default(), &recorder);

    block_on(store.remove("a")).unwrap();

    let state = recorder.state();
    assert_eq!(state.logs.len(), 1);
    assert!(state.current.is_none());
    assert_eq!(recorder.notices(), vec![Notice::success(DELETE_SUCCEEDED)]);
}

#[test]
fn remove_with_empty_id_never_calls_backend() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::default(), &recorder);

    assert!(block_on(store.remove("  ")).is_err());
    assert!(store.backend().calls().is_empty());
    assert!(recorder.actions.borrow().is_empty());
}

#[test]
fn remove_failure_keeps_list() {
    let recorder = Recorder::with_state(LogsState { logs: vec![summary("a")], ..LogsState::default() });
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    assert!(block_on(store.remove("a")).is_err());
    assert_eq!(recorder.state().logs.len(), 1);
    assert_eq!(recorder.state().error.as_deref(), Some(DELETE_FAILED));
}

// =============================================================
// export / search / clear
// =============================================================

#[test]
fn export_saves_named_file_and_toasts() {
    let backend = FakeBackend { export_bytes: b"%PDF-1.4".to_vec(), ..FakeBackend::default() };
    let recorder = Recorder::default();
    let store = LogStore::new(backend, &recorder);

    block_on(store.export("abc", ExportFormat::Pdf)).unwrap();

    let files = recorder.files.borrow().clone();
    assert_eq!(
        files,
        vec![("maintenance_log_abc.pdf".to_owned(), "application/pdf".to_owned(), b"%PDF-1.4".to_vec())]
    );
    assert_eq!(recorder.notices(), vec![Notice::success("PDF export successful!")]);
    assert!(recorder.actions.borrow().is_empty());
}

#[test]
fn export_failure_only_toasts() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    assert!(block_on(store.export("abc", ExportFormat::Json)).is_err());
    assert!(recorder.files.borrow().is_empty());
    assert!(recorder.state().error.is_none());
    let notices = recorder.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, ToastKind::Error);
    assert_eq!(notices[0].message, "Failed to export JSON");
}

#[test]
fn search_trims_query_and_replaces_list() {
    let backend = FakeBackend { search_hits: vec![summary("hit")], ..FakeBackend::default() };
    let recorder = Recorder::with_state(LogsState { logs: vec![summary("a"), summary("b")], ..LogsState::default() });
    let store = LogStore::new(backend, &recorder);

    block_on(store.search("  N123AB ")).unwrap();

    assert_eq!(store.backend().calls(), vec!["search N123AB"]);
    assert_eq!(recorder.state().logs.len(), 1);
    assert_eq!(recorder.state().logs[0].id, "hit");
}

#[test]
fn blank_search_is_ignored() {
    let recorder = Recorder::with_state(LogsState { logs: vec![summary("a")], ..LogsState::default() });
    let store = LogStore::new(FakeBackend::default(), &recorder);

    block_on(store.search("   ")).unwrap();

    assert!(store.backend().calls().is_empty());
    assert_eq!(recorder.state().logs.len(), 1);
}

#[test]
fn search_failure_reports_search_error() {
    let recorder = Recorder::default();
    let store = LogStore::new(FakeBackend::failing(), &recorder);

    assert!(block_on(store.search("N1")).is_err());
    assert_eq!(recorder.state().error.as_deref(), Some(SEARCH_FAILED));
}

#[test]
fn clear_current_and_clear_error() {
    let recorder = Recorder::with_state(LogsState {
        current: Some(log_record("a")),
        error: Some("boom".to_owned()),
        ..LogsState::default()
    });
    let store = LogStore::new(FakeBackend::default(), &recorder);

    store.clear_current();
    store.clear_error();

    let state = recorder.state();
    assert!(state.current.is_none());
    assert!(state.error.is_none());
}
