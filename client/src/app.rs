//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the host for every SSR request; `App` is both
//! server-rendered and hydrated. The sidebar, busy overlay and toaster sit
//! outside `<Routes>` so they survive navigation between `/` and
//! `/logs/{id}`; only the main panel is route-scoped.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{busy_overlay::BusyOverlay, sidebar::Sidebar, toaster::Toaster};
use crate::net::api::encode_path_segment;
use crate::pages::home::HomePage;
use crate::state::detail::DetailState;
use crate::state::log_store::{spawn_op, use_log_store};
use crate::state::logs::LogsState;
use crate::state::toasts::ToastState;
use crate::state::ui::UiState;
use crate::util::config::{API_URL_META, ApiConfig};
use crate::util::ui_persistence::{load_ui_state, save_ui_state};

/// Path of the deep link that opens one record.
pub fn log_path(id: &str) -> String {
    format!("/logs/{}", encode_path_segment(id))
}

/// HTML shell rendered on the server for SSR + hydration.
///
/// Publishes the backend URL from the host's `ApiConfig` context so the
/// hydrated client talks to the same backend.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let api_url = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::detect).base_url;
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_URL_META content=api_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<ApiConfig>().unwrap_or_else(ApiConfig::detect);
    let logs = RwSignal::new(LogsState::default());
    let toasts = RwSignal::new(ToastState::default());
    let ui = RwSignal::new(UiState::default());
    let detail = RwSignal::new(DetailState::default());

    provide_context(config);
    provide_context(logs);
    provide_context(toasts);
    provide_context(ui);
    provide_context(detail);

    // Detail buffer follows the committed record.
    let current = Memo::new(move |_| logs.with(|state| state.current.clone()));
    Effect::new(move || {
        let current = current.get();
        detail.update(|state| state.sync(current.as_ref()));
    });

    // Stored layout preference is applied after hydration so SSR markup matches.
    Effect::new(move || ui.set(load_ui_state()));
    Effect::new(move || ui.with(save_ui_state));

    let store = use_log_store();
    Effect::new(move || {
        let store = store.clone();
        spawn_op(async move {
            let _ = store.fetch_all().await;
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/logbook.css"/>
        <Title text="Aircraft Maintenance Log Analyzer"/>

        <Router>
            <div class="app-layout">
                <Sidebar/>
                <main class="main-panel">
                    <header class="main-panel__header">
                        <h1>"AI-Powered Aircraft Maintenance Log Analyzer"</h1>
                        <p>"Upload maintenance log images to extract structured data using AI"</p>
                    </header>
                    <div class="main-panel__body">
                        <Routes fallback=|| "Page not found.".into_view()>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=(StaticSegment("logs"), ParamSegment("id")) view=HomePage/>
                        </Routes>
                    </div>
                </main>
            </div>
            <BusyOverlay/>
            <Toaster/>
        </Router>
    }
}
