use super::*;

#[test]
fn sidebar_starts_open() {
    assert!(UiState::default().sidebar_open);
}

#[test]
fn toggle_sidebar_flips() {
    let mut state = UiState::default();
    state.toggle_sidebar();
    assert!(!state.sidebar_open);
    state.toggle_sidebar();
    assert!(state.sidebar_open);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let state: UiState = serde_json::from_str("{}").unwrap();
    assert_eq!(state, UiState::default());
}
