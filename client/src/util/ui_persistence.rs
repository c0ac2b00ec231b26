//! Browser localStorage persistence for `UiState`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps the sidebar collapse preference across visits. Hydrate-only; SSR
//! always renders the default layout and the stored value is applied after
//! hydration.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use crate::state::ui::UiState;

pub const STORAGE_KEY: &str = "logbook_ui";

/// Parse a stored value; anything unreadable yields the default state.
pub fn decode_ui_state(raw: Option<&str>) -> UiState {
    raw.and_then(|raw| serde_json::from_str(raw).ok()).unwrap_or_default()
}

pub fn load_ui_state() -> UiState {
    #[cfg(feature = "hydrate")]
    {
        let raw = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        decode_ui_state(raw.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        UiState::default()
    }
}

pub fn save_ui_state(state: &UiState) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(state) else {
            return;
        };
        let _ = storage.set_item(STORAGE_KEY, &raw);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = state;
    }
}
