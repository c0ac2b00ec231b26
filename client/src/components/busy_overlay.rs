//! Full-screen overlay shown while an upload is being sent or analyzed.

use leptos::prelude::*;

use crate::state::logs::LogsState;

pub const ANALYZING_TEXT: &str = "Analyzing maintenance log with AI...";
pub const UPLOADING_TEXT: &str = "Uploading image...";

#[component]
pub fn BusyOverlay() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();

    view! {
        <Show when=move || logs.with(LogsState::busy)>
            <div class="busy-overlay" aria-busy="true">
                <div class="busy-overlay__panel">
                    <span class="spinner" aria-hidden="true"></span>
                    <p class="busy-overlay__title">
                        {move || if logs.with(|s| s.analyzing) { ANALYZING_TEXT } else { UPLOADING_TEXT }}
                    </p>
                    <p class="busy-overlay__hint">"This may take a few moments"</p>
                </div>
            </div>
        </Show>
    }
}
