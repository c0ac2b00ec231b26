//! Store operations: one backend call, then one or more reducer actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components never talk to `net::api` directly. They build a `LogStore`
//! from context (`use_log_store`) and call the named operations below, which
//! translate backend outcomes into `LogAction`s, toasts, and file saves via
//! the `StoreEffects` seam.
//!
//! ERROR HANDLING
//! ==============
//! Failures set the store's one-line `error`, push an error toast, clear the
//! operation's own busy flag, and are returned to the caller. Nothing
//! retries; there is no de-duplication of concurrent calls.

#[cfg(test)]
#[path = "log_store_test.rs"]
mod log_store_test;

use std::future::Future;

use leptos::prelude::*;

use crate::net::api::{ApiError, HttpBackend, LogBackend, UploadFile};
use crate::net::types::{ExportFormat, MaintenanceLog, MaintenanceLogData};
use crate::state::logs::{LogAction, LogsState};
use crate::state::toasts::{Notice, ToastState, push_toast};
use crate::util::config::ApiConfig;

pub const FETCH_FAILED: &str = "Failed to fetch maintenance logs";
pub const LOAD_FAILED: &str = "Failed to load maintenance log";
pub const UPLOAD_FAILED: &str = "Failed to analyze maintenance log";
pub const UPDATE_FAILED: &str = "Failed to update maintenance log";
pub const DELETE_FAILED: &str = "Failed to delete maintenance log";
pub const SEARCH_FAILED: &str = "Failed to search maintenance logs";

pub const UPLOAD_SUCCEEDED: &str = "Maintenance log analyzed successfully!";
pub const UPDATE_SUCCEEDED: &str = "Maintenance log updated successfully!";
pub const DELETE_SUCCEEDED: &str = "Maintenance log deleted successfully!";

/// Side effects an operation may trigger besides talking to the backend.
pub trait StoreEffects {
    /// Commit one reducer transition.
    fn dispatch(&self, action: LogAction);
    /// Show a transient notification.
    fn notify(&self, notice: Notice);
    /// Hand bytes to the browser as a downloaded file.
    fn save_file(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>);
}

/// Named store operations over a backend and an effects sink.
#[derive(Clone, Debug)]
pub struct LogStore<B, E> {
    backend: B,
    effects: E,
}

impl<B: LogBackend, E: StoreEffects> LogStore<B, E> {
    pub fn new(backend: B, effects: E) -> Self {
        Self { backend, effects }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn fail(&self, operation: &str, message: &str, err: &ApiError) {
        log::warn!("{operation} failed: {err}");
        self.effects.dispatch(LogAction::SetError(message.to_owned()));
        self.effects.notify(Notice::error(message));
    }

    /// Load the full collection, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording it in the store.
    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        self.effects.dispatch(LogAction::SetLoading(true));
        match self.backend.list_logs().await {
            Ok(logs) => {
                self.effects.dispatch(LogAction::SetLogs(logs));
                Ok(())
            }
            Err(err) => {
                self.fail("fetch_all", FETCH_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Load one record and make it current.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording it in the store.
    pub async fn fetch_one(&self, id: &str) -> Result<(), ApiError> {
        self.effects.dispatch(LogAction::SetLoading(true));
        match self.backend.get_log(id).await {
            Ok(log) => {
                self.effects.dispatch(LogAction::SetCurrent(Some(log)));
                Ok(())
            }
            Err(err) => {
                self.fail("fetch_one", LOAD_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Submit an image for analysis, then select and list the new record.
    ///
    /// # Errors
    ///
    /// Returns the transport error, or `ApiError::Rejected` when the backend
    /// reports `success: false`. Both upload flags are cleared either way.
    pub async fn upload(&self, file: &UploadFile) -> Result<MaintenanceLog, ApiError> {
        self.effects.dispatch(LogAction::SetUploading(true));
        self.effects.dispatch(LogAction::SetAnalyzing(true));

        match self.upload_and_load(file).await {
            Ok(log) => {
                log::info!("analyzed {} as record {}", file.name, log.id);
                self.effects.dispatch(LogAction::AddLog(log.clone()));
                // The list refresh reports its own failure.
                let _ = self.fetch_all().await;
                self.effects.notify(Notice::success(UPLOAD_SUCCEEDED));
                Ok(log)
            }
            Err(err) => {
                self.effects.dispatch(LogAction::SetUploading(false));
                self.effects.dispatch(LogAction::SetAnalyzing(false));
                self.fail("upload", UPLOAD_FAILED, &err);
                Err(err)
            }
        }
    }

    async fn upload_and_load(&self, file: &UploadFile) -> Result<MaintenanceLog, ApiError> {
        let response = self.backend.upload_log(file).await?;
        if !response.success {
            let message = if response.message.is_empty() { "Upload failed".to_owned() } else { response.message };
            return Err(ApiError::Rejected(message));
        }
        let log_id = response
            .log_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Decode("upload response missing log_id".to_owned()))?;
        self.backend.get_log(&log_id).await
    }

    /// Replace a record's structured data with `data`.
    ///
    /// On success the server's canonical copy becomes current and the list is
    /// refreshed. On failure local state is untouched so the caller can keep
    /// its edit buffer.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording it in the store.
    pub async fn update(&self, id: &str, data: &MaintenanceLogData) -> Result<MaintenanceLog, ApiError> {
        match self.backend.update_log(id, data).await {
            Ok(log) => {
                self.effects.dispatch(LogAction::UpdateLog(log.clone()));
                let _ = self.fetch_all().await;
                self.effects.notify(Notice::success(UPDATE_SUCCEEDED));
                Ok(log)
            }
            Err(err) => {
                self.fail("update", UPDATE_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Delete a record and drop it from the list (and from current).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for an empty id without calling the
    /// backend, otherwise the backend error after recording it.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        if id.trim().is_empty() {
            log::warn!("remove called without a log id");
            return Err(ApiError::Rejected("invalid log id".to_owned()));
        }
        match self.backend.delete_log(id).await {
            Ok(()) => {
                self.effects.dispatch(LogAction::DeleteLog(id.to_owned()));
                self.effects.notify(Notice::success(DELETE_SUCCEEDED));
                Ok(())
            }
            Err(err) => {
                self.fail("remove", DELETE_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Download a backend rendering of one record. Store state is untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend error; only a toast is shown for it.
    pub async fn export(&self, id: &str, format: ExportFormat) -> Result<(), ApiError> {
        match self.backend.export_log(id, format).await {
            Ok(bytes) => {
                self.effects.save_file(&format.file_name(id), format.mime_type(), bytes);
                self.effects.notify(Notice::success(format!("{} export successful!", format.label())));
                Ok(())
            }
            Err(err) => {
                log::warn!("export failed: {err}");
                self.effects.notify(Notice::error(format!("Failed to export {}", format.label())));
                Err(err)
            }
        }
    }

    /// Replace the list with records matching an aircraft registration.
    /// Blank queries are ignored.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording it in the store.
    pub async fn search(&self, query: &str) -> Result<(), ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(());
        }
        self.effects.dispatch(LogAction::SetLoading(true));
        match self.backend.search_logs(query).await {
            Ok(logs) => {
                self.effects.dispatch(LogAction::SetLogs(logs));
                Ok(())
            }
            Err(err) => {
                self.fail("search", SEARCH_FAILED, &err);
                Err(err)
            }
        }
    }

    /// Deselect the current record ("New Log").
    pub fn clear_current(&self) {
        self.effects.dispatch(LogAction::SetCurrent(None));
    }

    pub fn clear_error(&self) {
        self.effects.dispatch(LogAction::ClearError);
    }
}

/// Effects backed by the Leptos context signals.
#[derive(Clone, Copy, Debug)]
pub struct SignalEffects {
    pub logs: RwSignal<LogsState>,
    pub toasts: RwSignal<ToastState>,
}

impl StoreEffects for SignalEffects {
    fn dispatch(&self, action: LogAction) {
        let _ = self.logs.try_update(|state| state.apply(action));
    }

    fn notify(&self, notice: Notice) {
        push_toast(self.toasts, notice);
    }

    fn save_file(&self, file_name: &str, mime_type: &str, bytes: Vec<u8>) {
        crate::util::download::save_bytes(file_name, mime_type, &bytes);
    }
}

/// The store as wired in the browser.
pub type BrowserStore = LogStore<HttpBackend, SignalEffects>;

/// Build the store from the contexts provided by `App`.
pub fn use_log_store() -> BrowserStore {
    let logs = expect_context::<RwSignal<LogsState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ApiConfig>();
    LogStore::new(HttpBackend::new(&config.base_url), SignalEffects { logs, toasts })
}

/// Run a store operation on the browser event loop; dropped during SSR.
pub fn spawn_op<F>(operation: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(operation);
    #[cfg(not(feature = "hydrate"))]
    drop(operation);
}
