//! Local UI chrome state.
//!
//! DESIGN
//! ======
//! Keeps presentation concerns (sidebar collapse) out of the log store so
//! layout can change without touching record data. Persisted across visits
//! by `util::ui_persistence`.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiState {
    /// Whether the log list sidebar is expanded.
    pub sidebar_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { sidebar_open: true }
    }
}

impl UiState {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
