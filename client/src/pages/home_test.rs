use super::*;
use crate::net::types::{MaintenanceLog, MaintenanceLogData};

fn record(id: &str) -> MaintenanceLog {
    MaintenanceLog {
        id: id.to_owned(),
        uploaded_by: "anonymous".to_owned(),
        timestamp: "2024-01-15T10:30:00".to_owned(),
        image_filename: None,
        original_image_url: None,
        structured_data: MaintenanceLogData::default(),
    }
}

#[test]
fn empty_store_shows_welcome() {
    assert_eq!(panel_view(&LogsState::default()), PanelView::Welcome);
}

#[test]
fn loading_without_record_shows_spinner() {
    let state = LogsState { loading: true, ..LogsState::default() };
    assert_eq!(panel_view(&state), PanelView::Loading);
}

#[test]
fn loading_wins_over_open_record() {
    let state = LogsState { loading: true, current: Some(record("a")), ..LogsState::default() };
    assert_eq!(panel_view(&state), PanelView::Loading);

    let settled = LogsState { loading: false, ..state };
    assert_eq!(panel_view(&settled), PanelView::Detail);
}

#[test]
fn route_param_fetches_only_when_different() {
    let state = LogsState { current: Some(record("a")), ..LogsState::default() };
    assert_eq!(pending_fetch(Some("a"), &state), None);
    assert_eq!(pending_fetch(Some("b"), &state), Some("b".to_owned()));
    assert_eq!(pending_fetch(None, &state), None);
    assert_eq!(pending_fetch(Some(""), &state), None);
}
