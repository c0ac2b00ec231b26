//! Main panel for `/` and `/logs/{id}`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route param is the source of truth for which record is open. A
//! param that differs from the store's current record triggers
//! `fetch_one`; everything else reads the store.
//!
//! Without a current record the panel shows the upload welcome view.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::log_detail::LogDetail;
use crate::components::upload_area::UploadArea;
use crate::state::log_store::{spawn_op, use_log_store};
use crate::state::logs::LogsState;

pub const LOADING_TEXT: &str = "Loading maintenance logs...";

/// What the main panel renders for a given store snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelView {
    Loading,
    Detail,
    Welcome,
}

/// Any in-flight load shows the spinner, even over an open record; the edit
/// buffer lives in `DetailState`, so the detail view resumes intact.
pub fn panel_view(state: &LogsState) -> PanelView {
    if state.loading {
        PanelView::Loading
    } else if state.current.is_some() {
        PanelView::Detail
    } else {
        PanelView::Welcome
    }
}

/// Id the route asks for that is not already open.
pub fn pending_fetch(param: Option<&str>, state: &LogsState) -> Option<String> {
    param.filter(|id| !id.is_empty() && !state.is_current(id)).map(str::to_owned)
}

const FEATURES: [(&str, &str, &str); 3] = [
    ("✦", "AI Analysis", "Advanced AI extracts structured data from handwritten and printed logs"),
    ("⇩", "Export & Share", "Export analyzed data as PDF reports or JSON for integration"),
    ("⌕", "Search & Filter", "Quickly find logs by aircraft, technician, or maintenance type"),
];

const FORMATS: [&str; 4] = ["JPEG", "PNG", "WebP", "TIFF"];

#[component]
pub fn HomePage() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let store = use_log_store();
    let params = use_params_map();

    let route_id = Memo::new(move |_| params.with(|p| p.get("id")));
    Effect::new(move || {
        let requested = route_id.get();
        let Some(id) = logs.with_untracked(|s| pending_fetch(requested.as_deref(), s)) else {
            return;
        };
        let store = store.clone();
        spawn_op(async move {
            let _ = store.fetch_one(&id).await;
        });
    });

    let view_kind = Memo::new(move |_| logs.with(panel_view));

    move || match view_kind.get() {
        PanelView::Loading => view! {
            <div class="main-panel__loading">
                <span class="spinner" aria-hidden="true"></span>
                <p>{LOADING_TEXT}</p>
            </div>
        }
        .into_any(),
        PanelView::Detail => view! { <LogDetail/> }.into_any(),
        PanelView::Welcome => view! { <Welcome/> }.into_any(),
    }
}

#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="welcome">
            <div class="card">
                <h2>"Upload Maintenance Log"</h2>
                <UploadArea/>
            </div>

            <div class="welcome__features">
                {FEATURES
                    .iter()
                    .map(|(icon, title, blurb)| {
                        view! {
                            <div class="card welcome__feature">
                                <span class="welcome__icon" aria-hidden="true">{*icon}</span>
                                <h3>{*title}</h3>
                                <p>{*blurb}</p>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>

            <div class="card welcome__formats">
                <h3>"Supported Formats"</h3>
                <div class="welcome__format-list">
                    {FORMATS.iter().map(|f| view! { <span class="badge">{*f}</span> }).collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
