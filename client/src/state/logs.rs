//! Maintenance-log collection state and its reducer.
//!
//! DESIGN
//! ======
//! Every mutation is a `LogAction` applied by `LogsState::apply`; nothing
//! assigns fields ad hoc. The async operations in `log_store` only decide
//! which actions to dispatch, which keeps this module a pure state machine
//! that tests can drive directly.
//!
//! `loading`, `uploading` and `analyzing` are independent flags rather than
//! one enum: the list can refresh while an upload is still being analyzed.

#[cfg(test)]
#[path = "logs_test.rs"]
mod logs_test;

use crate::net::types::{LogSummary, MaintenanceLog};

/// The single store state tree shared through Leptos context.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogsState {
    /// Records in backend order (newest first); never sorted client-side.
    pub logs: Vec<LogSummary>,
    /// Record selected for detail viewing/editing.
    pub current: Option<MaintenanceLog>,
    pub loading: bool,
    pub uploading: bool,
    pub analyzing: bool,
    /// One-line message from the most recent failed operation.
    pub error: Option<String>,
}

/// State transitions understood by [`LogsState::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum LogAction {
    SetLoading(bool),
    /// Record a failure message; also ends any list/detail load.
    SetError(String),
    ClearError,
    /// Replace the list wholesale (fetch or search result).
    SetLogs(Vec<LogSummary>),
    SetCurrent(Option<MaintenanceLog>),
    /// A freshly analyzed record: prepend, select, and end the upload.
    AddLog(MaintenanceLog),
    /// The server's canonical copy after a save.
    UpdateLog(MaintenanceLog),
    DeleteLog(String),
    SetUploading(bool),
    SetAnalyzing(bool),
}

impl LogsState {
    /// Apply one action. This is the only place store fields change.
    pub fn apply(&mut self, action: LogAction) {
        match action {
            LogAction::SetLoading(loading) => self.loading = loading,
            LogAction::SetError(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            LogAction::ClearError => self.error = None,
            LogAction::SetLogs(logs) => {
                self.logs = logs;
                self.loading = false;
            }
            LogAction::SetCurrent(current) => {
                self.current = current;
                self.loading = false;
            }
            LogAction::AddLog(log) => {
                self.logs.insert(0, LogSummary::from(&log));
                self.current = Some(log);
                self.uploading = false;
                self.analyzing = false;
            }
            LogAction::UpdateLog(log) => {
                let summary = LogSummary::from(&log);
                for item in self.logs.iter_mut().filter(|item| item.id == log.id) {
                    *item = summary.clone();
                }
                self.current = Some(log);
            }
            LogAction::DeleteLog(id) => {
                self.logs.retain(|item| item.id != id);
                if self.current_id() == Some(id.as_str()) {
                    self.current = None;
                }
            }
            LogAction::SetUploading(uploading) => self.uploading = uploading,
            LogAction::SetAnalyzing(analyzing) => self.analyzing = analyzing,
        }
    }

    /// Consume `self`, apply `action`, and return the next state.
    #[must_use]
    pub fn reduce(mut self, action: LogAction) -> Self {
        self.apply(action);
        self
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|log| log.id.as_str())
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current_id() == Some(id)
    }

    /// True while an upload is in flight or being analyzed (busy overlay).
    pub fn busy(&self) -> bool {
        self.uploading || self.analyzing
    }
}
