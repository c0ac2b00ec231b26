use super::*;
use crate::net::types::{LogEntry, MaintenanceLogData, RiskLevel};

// =============================================================
// Helpers
// =============================================================

fn summary(id: &str, registration: &str) -> LogSummary {
    LogSummary {
        id: id.to_owned(),
        aircraft_registration: Some(registration.to_owned()),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        description: Some("Oil change".to_owned()),
        risk_level: Some(RiskLevel::Low),
    }
}

fn record(id: &str, registration: &str) -> MaintenanceLog {
    MaintenanceLog {
        id: id.to_owned(),
        uploaded_by: "anonymous".to_owned(),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        image_filename: None,
        original_image_url: None,
        structured_data: MaintenanceLogData {
            aircraft_registration: Some(registration.to_owned()),
            log_entries: vec![LogEntry {
                description_of_work_performed: Some("Replaced tire".to_owned()),
                risk_level: Some(RiskLevel::High),
                ..LogEntry::default()
            }],
            ..MaintenanceLogData::default()
        },
    }
}

fn state_with(ids: &[&str]) -> LogsState {
    LogsState {
        logs: ids.iter().map(|id| summary(id, "N123")).collect(),
        ..LogsState::default()
    }
}

// =============================================================
// Defaults and flags
// =============================================================

#[test]
fn default_state_is_idle_and_empty() {
    let state = LogsState::default();
    assert!(state.logs.is_empty());
    assert!(state.current.is_none());
    assert!(!state.loading && !state.uploading && !state.analyzing);
    assert!(state.error.is_none());
    assert!(!state.busy());
}

#[test]
fn busy_reflects_either_upload_flag() {
    let uploading = LogsState::default().reduce(LogAction::SetUploading(true));
    assert!(uploading.busy());
    let analyzing = LogsState::default().reduce(LogAction::SetAnalyzing(true));
    assert!(analyzing.busy());
}

#[test]
fn set_error_records_message_and_clears_loading() {
    let state = LogsState::default()
        .reduce(LogAction::SetLoading(true))
        .reduce(LogAction::SetError("Failed to fetch maintenance logs".to_owned()));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch maintenance logs"));

    let cleared = state.reduce(LogAction::ClearError);
    assert!(cleared.error.is_none());
}

#[test]
fn set_error_leaves_upload_flags_to_their_own_actions() {
    let state = LogsState::default()
        .reduce(LogAction::SetUploading(true))
        .reduce(LogAction::SetAnalyzing(true))
        .reduce(LogAction::SetError("boom".to_owned()));
    assert!(state.busy());
}

// =============================================================
// List and current
// =============================================================

#[test]
fn set_logs_replaces_list_and_clears_loading() {
    let state = state_with(&["a", "b"])
        .reduce(LogAction::SetLoading(true))
        .reduce(LogAction::SetLogs(vec![summary("c", "N9")]));
    assert_eq!(state.logs.len(), 1);
    assert_eq!(state.logs[0].id, "c");
    assert!(!state.loading);
}

#[test]
fn set_current_selects_and_clears() {
    let state = LogsState::default().reduce(LogAction::SetCurrent(Some(record("a", "N1"))));
    assert!(state.is_current("a"));
    let cleared = state.reduce(LogAction::SetCurrent(None));
    assert!(cleared.current.is_none());
}

#[test]
fn add_log_prepends_selects_and_ends_upload() {
    let state = state_with(&["a"])
        .reduce(LogAction::SetUploading(true))
        .reduce(LogAction::SetAnalyzing(true))
        .reduce(LogAction::AddLog(record("new", "N777")));
    assert_eq!(state.logs[0].id, "new");
    assert_eq!(state.logs[0].aircraft_registration.as_deref(), Some("N777"));
    assert_eq!(state.logs[1].id, "a");
    assert!(state.is_current("new"));
    assert!(!state.uploading);
    assert!(!state.analyzing);
}

#[test]
fn update_log_replaces_matching_entry_and_current() {
    let state = state_with(&["a", "b"]).reduce(LogAction::UpdateLog(record("b", "N555")));
    assert_eq!(state.logs.len(), 2);
    assert_eq!(state.logs[0].aircraft_registration.as_deref(), Some("N123"));
    assert_eq!(state.logs[1].aircraft_registration.as_deref(), Some("N555"));
    assert_eq!(state.logs[1].risk_level, Some(RiskLevel::High));
    assert!(state.is_current("b"));
}

#[test]
fn update_log_for_unknown_id_only_sets_current() {
    let before = state_with(&["a"]);
    let state = before.clone().reduce(LogAction::UpdateLog(record("zzz", "N1")));
    assert_eq!(state.logs, before.logs);
    assert!(state.is_current("zzz"));
}

// =============================================================
// Delete
// =============================================================

#[test]
fn deleting_current_record_clears_current() {
    let state = state_with(&["a", "b"])
        .reduce(LogAction::SetCurrent(Some(record("a", "N1"))))
        .reduce(LogAction::DeleteLog("a".to_owned()));
    assert_eq!(state.logs.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
    assert!(state.current.is_none());
}

#[test]
fn deleting_other_record_keeps_current() {
    let state = state_with(&["a", "b"])
        .reduce(LogAction::SetCurrent(Some(record("a", "N1"))))
        .reduce(LogAction::DeleteLog("b".to_owned()));
    assert_eq!(state.logs.len(), 1);
    assert!(state.is_current("a"));
}

#[test]
fn deleting_without_selection_keeps_current_empty() {
    let state = state_with(&["a"]).reduce(LogAction::DeleteLog("a".to_owned()));
    assert!(state.logs.is_empty());
    assert!(state.current.is_none());
}

#[test]
fn delete_preserves_backend_order() {
    let state = state_with(&["c", "a", "b"]).reduce(LogAction::DeleteLog("a".to_owned()));
    assert_eq!(state.logs.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["c", "b"]);
}
