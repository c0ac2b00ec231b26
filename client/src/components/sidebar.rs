//! Log list sidebar: search, selection, per-row delete, collapse toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lives outside `<Routes>` so the search box and scroll position survive
//! navigation. Selecting a row navigates to the record's deep link; the
//! home page turns that into `fetch_one`. Re-selecting the row that is
//! already routed fetches directly, since the URL does not change.
//!
//! Rows render in backend order; nothing is sorted client-side.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::log_path;
use crate::net::types::LogSummary;
use crate::state::log_store::{spawn_op, use_log_store};
use crate::state::logs::LogsState;
use crate::state::ui::UiState;
use crate::util::assessment::risk_text_color;
use crate::util::timefmt::format_date;

/// Footer text, e.g. `1 maintenance log` / `3 maintenance logs`.
pub fn log_count_label(count: usize) -> String {
    if count == 1 { "1 maintenance log".to_owned() } else { format!("{count} maintenance logs") }
}

pub fn row_registration(log: &LogSummary) -> String {
    log.aircraft_registration
        .as_deref()
        .filter(|reg| !reg.trim().is_empty())
        .unwrap_or("Unknown")
        .to_owned()
}

pub fn row_description(log: &LogSummary) -> String {
    log.description
        .as_deref()
        .filter(|desc| !desc.trim().is_empty())
        .unwrap_or("No description")
        .to_owned()
}

pub fn row_risk(log: &LogSummary) -> String {
    log.risk_level.as_ref().map_or_else(|| "Unknown".to_owned(), ToString::to_string)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let store = use_log_store();
    let navigate = use_navigate();
    let location = use_location();
    let query = RwSignal::new(String::new());

    let on_search = {
        let store = store.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let term = query.get_untracked();
            if term.trim().is_empty() {
                return;
            }
            let store = store.clone();
            spawn_op(async move {
                let _ = store.search(&term).await;
            });
        }
    };

    let on_show_all = {
        let store = store.clone();
        move |_| {
            query.set(String::new());
            let store = store.clone();
            spawn_op(async move {
                let _ = store.fetch_all().await;
            });
        }
    };

    let on_select = Callback::new({
        let store = store.clone();
        let navigate = navigate.clone();
        move |id: String| {
            let path = log_path(&id);
            if location.pathname.get_untracked() == path {
                let store = store.clone();
                spawn_op(async move {
                    let _ = store.fetch_one(&id).await;
                });
            } else {
                navigate(&path, NavigateOptions::default());
            }
        }
    });

    let on_delete = Callback::new(move |id: String| {
        let was_current = logs.with_untracked(|state| state.is_current(&id));
        let store = store.clone();
        let navigate = navigate.clone();
        spawn_op(async move {
            if store.remove(&id).await.is_ok() && was_current {
                navigate("/", NavigateOptions::default());
            }
        });
    });

    let open = move || ui.with(|state| state.sidebar_open);

    view! {
        <aside class="sidebar" class:sidebar--collapsed=move || !open()>
            <div class="sidebar__header">
                <Show when=open>
                    <h2 class="sidebar__title">"Maintenance Logs"</h2>
                </Show>
                <button
                    class="btn sidebar__toggle"
                    on:click=move |_| ui.update(UiState::toggle_sidebar)
                    title=move || if open() { "Collapse sidebar" } else { "Expand sidebar" }
                >
                    {move || if open() { "‹" } else { "›" }}
                </button>
            </div>

            <Show when=open>
                <form class="sidebar__search" on:submit=on_search.clone()>
                    <input
                        class="sidebar__search-input"
                        type="search"
                        placeholder="Search by aircraft registration..."
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                    />
                    <button class="btn sidebar__show-all" type="button" on:click=on_show_all.clone()>
                        "All"
                    </button>
                </form>
            </Show>

            <div class="sidebar__list">
                <Show
                    when=move || !logs.with(|s| s.loading)
                    fallback=|| view! { <div class="sidebar__loading"><span class="spinner"></span></div> }
                >
                    <Show
                        when=move || logs.with(|s| !s.logs.is_empty())
                        fallback=move || {
                            view! {
                                <div class="sidebar__empty">
                                    <Show when=open>
                                        <p>"No maintenance logs yet"</p>
                                        <p class="sidebar__empty-hint">"Upload a maintenance log to get started"</p>
                                    </Show>
                                </div>
                            }
                        }
                    >
                        {move || {
                            logs.get()
                                .logs
                                .into_iter()
                                .map(|log| {
                                    view! {
                                        <SidebarRow
                                            log=log
                                            expanded=Signal::derive(open)
                                            on_select=on_select
                                            on_delete=on_delete
                                        />
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </Show>
                </Show>
            </div>

            <Show when=open>
                <footer class="sidebar__footer">
                    {move || log_count_label(logs.with(|s| s.logs.len()))}
                </footer>
            </Show>
        </aside>
    }
}

/// One list row. The delete button never selects the row.
#[component]
fn SidebarRow(
    log: LogSummary,
    expanded: Signal<bool>,
    on_select: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let id = log.id.clone();
    let active = {
        let id = id.clone();
        move || logs.with(|state| state.is_current(&id))
    };
    let select_id = id.clone();
    let delete_id = id;

    let registration = row_registration(&log);
    let tooltip = registration.clone();
    let risk = row_risk(&log);
    let risk_class = format!("sidebar-row__risk {}", risk_text_color(log.risk_level.as_ref()));
    let description = row_description(&log);
    let date = format_date(&log.timestamp);

    view! {
        <div
            class="sidebar-row"
            class:sidebar-row--active=active
            on:click=move |_| on_select.run(select_id.clone())
            title=tooltip
        >
            <span class="sidebar-row__icon" aria-hidden="true">"✈"</span>
            <Show when=move || expanded.get()>
                <div class="sidebar-row__body">
                    <div class="sidebar-row__heading">
                        <span class="sidebar-row__registration">{registration.clone()}</span>
                        <span class=risk_class.clone()>{risk.clone()}</span>
                    </div>
                    <p class="sidebar-row__description">{description.clone()}</p>
                    <span class="sidebar-row__date">{date.clone()}</span>
                </div>
                <button
                    class="btn sidebar-row__delete"
                    type="button"
                    title="Delete log"
                    aria-label="Delete log"
                    on:click={
                        let delete_id = delete_id.clone();
                        move |ev: leptos::ev::MouseEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            on_delete.run(delete_id.clone());
                        }
                    }
                >
                    "✕"
                </button>
            </Show>
        </div>
    }
}
