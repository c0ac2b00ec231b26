//! Detail view for the current record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the home page whenever the store has a current record. Reads
//! the committed copy from `LogsState` for the header and image, and the
//! edit buffer from `DetailState` for everything else, so derived status
//! cards follow unsaved edits.
//!
//! ERROR HANDLING
//! ==============
//! Save keeps edit mode open on failure; the store has already toasted.
//! An image that fails to load is replaced by its file name.

#[cfg(test)]
#[path = "log_detail_test.rs"]
mod log_detail_test;

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::entry_fields::{EntryCard, EntryFields, LogTextField};
use crate::net::api::image_url;
use crate::net::types::{ExportFormat, MaintenanceLogData};
use crate::state::detail::{DetailState, LogField};
use crate::state::log_store::{spawn_op, use_log_store};
use crate::state::logs::LogsState;
use crate::util::assessment::{
    airworthy_color, consensus_color, overall_airworthy, risk_color, risk_consensus, urgency_color,
    urgency_consensus,
};
use crate::util::config::ApiConfig;
use crate::util::timefmt::format_datetime;

/// `Aircraft: N123AB • Jan 15, 2024 10:30`, or just the time when the
/// registration is unknown.
pub fn header_subtitle(registration: Option<&str>, timestamp: &str) -> String {
    let when = format_datetime(timestamp);
    match registration.filter(|reg| !reg.trim().is_empty()) {
        Some(reg) => format!("Aircraft: {reg} • {when}"),
        None => when,
    }
}

/// The summary card only appears for multi-entry records that have one.
pub fn shows_summary(data: &MaintenanceLogData) -> bool {
    data.summary.as_deref().is_some_and(|s| !s.trim().is_empty()) && data.log_entries.len() > 1
}

pub fn image_cursor(detail: &DetailState) -> &'static str {
    if detail.is_dragging() {
        "grabbing"
    } else if detail.can_pan() {
        "grab"
    } else {
        "default"
    }
}

pub fn image_style(detail: &DetailState) -> String {
    format!("transform: {}; transform-origin: center; cursor: {};", detail.image_transform(), image_cursor(detail))
}

#[component]
pub fn LogDetail() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let detail = expect_context::<RwSignal<DetailState>>();
    let store = use_log_store();
    let navigate = use_navigate();

    let subtitle = move || {
        logs.with(|s| {
            s.current
                .as_ref()
                .map(|log| header_subtitle(log.aircraft_registration(), &log.timestamp))
                .unwrap_or_default()
        })
    };
    let editing = move || detail.with(|d| d.editing);
    let current_id = move || logs.with_untracked(|s| s.current_id().map(str::to_owned));

    let on_save = {
        let store = store.clone();
        move |_: MouseEvent| {
            let Some(id) = current_id() else {
                return;
            };
            let data = detail.with_untracked(|d| d.buffer.clone());
            let store = store.clone();
            spawn_op(async move {
                if let Ok(saved) = store.update(&id, &data).await {
                    detail.try_update(|d| d.finish_save(&saved));
                }
            });
        }
    };

    let export = {
        let store = store.clone();
        move |format: ExportFormat| {
            let Some(id) = current_id() else {
                return;
            };
            let store = store.clone();
            spawn_op(async move {
                let _ = store.export(&id, format).await;
            });
        }
    };
    let export_pdf = {
        let export = export.clone();
        move |_: MouseEvent| export(ExportFormat::Pdf)
    };
    let export_json = move |_: MouseEvent| export(ExportFormat::Json);

    let on_new = move |_: MouseEvent| {
        store.clear_current();
        navigate("/", NavigateOptions::default());
    };

    let entry_count = Memo::new(move |_| detail.with(|d| d.buffer.log_entries.len()));

    view! {
        <div class="log-detail">
            <div class="log-detail__header">
                <div>
                    <h2>"Maintenance Log Analysis"</h2>
                    <p class="log-detail__subtitle">{subtitle}</p>
                </div>
                <div class="log-detail__actions">
                    <button class="btn" hidden=editing on:click=move |_| detail.update(DetailState::begin_edit)>
                        "Edit"
                    </button>
                    <button class="btn" hidden=editing on:click=export_pdf>"Export PDF"</button>
                    <button class="btn" hidden=editing on:click=export_json>"Export JSON"</button>
                    <button class="btn btn--primary" hidden=editing on:click=on_new>"New Log"</button>
                    <button class="btn btn--primary" hidden=move || !editing() on:click=on_save>"Save"</button>
                    <button class="btn" hidden=move || !editing() on:click=move |_| detail.update(DetailState::cancel_edit)>
                        "Cancel"
                    </button>
                </div>
            </div>

            <ImagePanel/>
            <StatusCards/>

            <div class="card">
                <h3>"Aircraft Information"</h3>
                <div class="log-detail__grid">
                    <LogTextField field=LogField::AircraftRegistration/>
                    <LogTextField field=LogField::AircraftMakeModel/>
                </div>
            </div>

            <Show when=move || detail.with(|d| shows_summary(&d.buffer))>
                <div class="card">
                    <h3>"Summary"</h3>
                    <LogTextField field=LogField::Summary multiline=true/>
                </div>
            </Show>

            {move || match entry_count.get() {
                0 => view! { <div class="card log-detail__empty">"No log entries were extracted from this image."</div> }.into_any(),
                1 => {
                    view! {
                        <div class="card">
                            <h3>"Maintenance Details"</h3>
                            <EntryFields index=0/>
                        </div>
                    }
                    .into_any()
                }
                count => {
                    view! {
                        <div class="log-detail__entries">
                            {(0..count).map(|index| view! { <EntryCard index=index/> }).collect::<Vec<_>>()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// Original image with zoom and drag-to-pan.
#[component]
fn ImagePanel() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let detail = expect_context::<RwSignal<DetailState>>();
    let config = expect_context::<ApiConfig>();
    let failed = RwSignal::new(false);

    let filename = Memo::new(move |_| {
        logs.with(|s| s.current.as_ref().and_then(|log| log.image_filename.clone()).filter(|f| !f.is_empty()))
    });
    // A new image gets a fresh chance to load.
    Effect::new(move || {
        filename.track();
        failed.set(false);
    });

    let src = Memo::new(move |_| filename.get().map(|name| image_url(&config.base_url, &name)).unwrap_or_default());

    view! {
        <Show when=move || filename.with(Option::is_some)>
            <div class="card image-panel">
                <div class="image-panel__toolbar">
                    <h3>
                        "Original Maintenance Log Image"
                        <Show when=move || detail.with(DetailState::can_pan)>
                            <span class="image-panel__hint">"(Drag to pan)"</span>
                        </Show>
                    </h3>
                    <div class="image-panel__controls">
                        <button
                            class="btn btn--icon"
                            title="Zoom Out"
                            disabled=move || !detail.with(DetailState::can_zoom_out)
                            on:click=move |_| detail.update(DetailState::zoom_out)
                        >
                            "−"
                        </button>
                        <span class="image-panel__zoom">{move || format!("{}%", detail.with(DetailState::zoom_percent))}</span>
                        <button
                            class="btn btn--icon"
                            title="Zoom In"
                            disabled=move || !detail.with(DetailState::can_zoom_in)
                            on:click=move |_| detail.update(DetailState::zoom_in)
                        >
                            "+"
                        </button>
                        <button
                            class="btn btn--icon"
                            title="Reset Zoom"
                            on:click=move |_| detail.update(DetailState::reset_zoom)
                        >
                            "⟲"
                        </button>
                    </div>
                </div>
                <div class="image-panel__frame">
                    <Show
                        when=move || !failed.get()
                        fallback=move || {
                            view! {
                                <div class="image-panel__fallback">
                                    <p>{move || format!("Original image: {}", filename.get().unwrap_or_default())}</p>
                                    <p class="image-panel__fallback-hint">"Image analysis completed successfully"</p>
                                </div>
                            }
                        }
                    >
                        <img
                            class="image-panel__image"
                            alt="Original maintenance log"
                            src=src
                            style=move || detail.with(image_style)
                            draggable="false"
                            on:error=move |_| {
                                log::warn!("image failed to load: {}", src.get_untracked());
                                failed.set(true);
                            }
                            on:mousedown=move |ev: MouseEvent| {
                                let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
                                detail.update(|d| d.start_drag(x, y));
                            }
                            on:mousemove=move |ev: MouseEvent| {
                                if detail.with_untracked(DetailState::is_dragging) {
                                    let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
                                    detail.update(|d| d.drag_to(x, y));
                                }
                            }
                            on:mouseup=move |_| detail.update(DetailState::end_drag)
                            on:mouseleave=move |_| detail.update(DetailState::end_drag)
                        />
                    </Show>
                </div>
            </div>
        </Show>
    }
}

/// Overall risk, urgency and airworthiness derived from the buffer.
#[component]
fn StatusCards() -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let risk = Memo::new(move |_| detail.with(|d| risk_consensus(&d.buffer.log_entries)));
    let urgency = Memo::new(move |_| detail.with(|d| urgency_consensus(&d.buffer.log_entries)));
    let airworthy = Memo::new(move |_| detail.with(|d| overall_airworthy(&d.buffer.log_entries)));

    view! {
        <div class="status-cards">
            <div class="card status-card">
                <span class=move || format!("status-card__badge {}", risk.with(|c| consensus_color(c, risk_color)))>"⚠"</span>
                <div>
                    <p class="status-card__label">"Overall Risk Level"</p>
                    <p class="status-card__value">{move || risk.with(ToString::to_string)}</p>
                </div>
            </div>
            <div class="card status-card">
                <span class=move || format!("status-card__badge {}", urgency.with(|c| consensus_color(c, urgency_color)))>"◷"</span>
                <div>
                    <p class="status-card__label">"Highest Urgency"</p>
                    <p class="status-card__value">{move || urgency.with(ToString::to_string)}</p>
                </div>
            </div>
            <div class="card status-card">
                <span class=move || format!("status-card__badge {}", airworthy_color(airworthy.get()))>
                    {move || if airworthy.get() { "✓" } else { "⚠" }}
                </span>
                <div>
                    <p class="status-card__label">"Overall Airworthiness"</p>
                    <p class="status-card__value">
                        {move || if airworthy.get() { "Airworthy" } else { "Not Airworthy" }}
                    </p>
                </div>
            </div>
        </div>
    }
}
