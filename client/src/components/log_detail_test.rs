use super::*;
use crate::net::types::LogEntry;

fn data(summary: Option<&str>, entries: usize) -> MaintenanceLogData {
    MaintenanceLogData {
        summary: summary.map(str::to_owned),
        log_entries: vec![LogEntry::default(); entries],
        ..MaintenanceLogData::default()
    }
}

#[test]
fn subtitle_names_aircraft_when_known() {
    assert_eq!(header_subtitle(Some("N123AB"), "2024-01-15T10:30:00"), "Aircraft: N123AB • Jan 15, 2024 10:30");
}

#[test]
fn subtitle_falls_back_to_time_only() {
    assert_eq!(header_subtitle(None, "2024-01-15T10:30:00"), "Jan 15, 2024 10:30");
    assert_eq!(header_subtitle(Some("  "), "2024-01-15T10:30:00"), "Jan 15, 2024 10:30");
}

#[test]
fn summary_needs_text_and_several_entries() {
    assert!(shows_summary(&data(Some("Annual inspection"), 2)));
    assert!(!shows_summary(&data(Some("Annual inspection"), 1)));
    assert!(!shows_summary(&data(Some(" "), 3)));
    assert!(!shows_summary(&data(None, 3)));
}

#[test]
fn cursor_tracks_pan_state() {
    let mut detail = DetailState::default();
    assert_eq!(image_cursor(&detail), "default");

    detail.zoom_in();
    assert_eq!(image_cursor(&detail), "grab");

    detail.start_drag(1.0, 1.0);
    assert_eq!(image_cursor(&detail), "grabbing");
    assert!(image_style(&detail).contains("cursor: grabbing"));
}

#[test]
fn style_carries_transform() {
    let detail = DetailState::default();
    assert_eq!(
        image_style(&detail),
        "transform: scale(1) translate(0px, 0px); transform-origin: center; cursor: default;"
    );
}
