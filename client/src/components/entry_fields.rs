//! Field editors for one record's buffer.
//!
//! DESIGN
//! ======
//! Every field reads a derived signal from `DetailState::buffer` and writes
//! back through `DetailState::edit` with a `LogEdit`. Lists (entries, part
//! numbers) only re-render when their length changes, so typing into an
//! input never rebuilds the input under the cursor.

#[cfg(test)]
#[path = "entry_fields_test.rs"]
mod entry_fields_test;

use leptos::prelude::*;

use crate::net::types::{RiskLevel, Urgency};
use crate::state::detail::{DetailState, EntryField, LogEdit, LogField};

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_SPECIFIED: &str = "None specified";

/// Read-mode text for an optional value.
pub fn display_text(value: Option<&str>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NOT_SPECIFIED).to_owned()
}

pub fn display_bool(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn editing(detail: RwSignal<DetailState>) -> impl Fn() -> bool + Copy + Send + Sync + 'static {
    move || detail.with(|d| d.editing)
}

/// Labelled text value; an input or textarea in edit mode.
#[component]
pub fn TextField(
    label: &'static str,
    #[prop(into)] value: Signal<Option<String>>,
    #[prop(optional)] multiline: bool,
    on_input: Callback<String>,
) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();

    view! {
        <div class="field">
            <span class="field__label">{label}</span>
            <Show
                when=editing(detail)
                fallback=move || view! { <p class="field__value">{move || display_text(value.get().as_deref())}</p> }
            >
                {if multiline {
                    view! {
                        <textarea
                            class="field__input"
                            rows="3"
                            prop:value=move || value.get().unwrap_or_default()
                            on:input=move |ev| on_input.run(event_target_value(&ev))
                        ></textarea>
                    }
                    .into_any()
                } else {
                    view! {
                        <input
                            class="field__input"
                            type="text"
                            prop:value=move || value.get().unwrap_or_default()
                            on:input=move |ev| on_input.run(event_target_value(&ev))
                        />
                    }
                    .into_any()
                }}
            </Show>
        </div>
    }
}

/// Record-level field bound to the buffer.
#[component]
pub fn LogTextField(field: LogField, #[prop(optional)] multiline: bool) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let value = Signal::derive(move || detail.with(|d| field.get(&d.buffer).map(str::to_owned)));
    let on_input = Callback::new(move |value: String| detail.update(|d| d.edit(LogEdit::Log { field, value })));

    view! { <TextField label=field.label() value=value multiline=multiline on_input=on_input/> }
}

fn entry_text(detail: RwSignal<DetailState>, index: usize, field: EntryField) -> AnyView {
    let value = Signal::derive(move || {
        detail.with(|d| d.buffer.log_entries.get(index).and_then(|entry| field.get(entry)).map(str::to_owned))
    });
    let on_input =
        Callback::new(move |value: String| detail.update(|d| d.edit(LogEdit::Entry { index, field, value })));

    view! { <TextField label=field.label() value=value multiline=field.multiline() on_input=on_input/> }.into_any()
}

fn entry_texts(detail: RwSignal<DetailState>, index: usize, fields: &[EntryField]) -> Vec<AnyView> {
    fields.iter().map(|field| entry_text(detail, index, *field)).collect()
}

/// Known options plus the current value when it is off the scale, so an
/// extracted value like "Critical" stays selected instead of reading blank.
pub fn select_options(known: &[String], current: Option<&str>) -> Vec<String> {
    let mut options = known.to_vec();
    let off_scale = current.filter(|c| !c.trim().is_empty() && !known.iter().any(|option| option == c));
    options.extend(off_scale.map(str::to_owned));
    options
}

/// Dropdown over a fixed option list; the empty option clears the value.
#[component]
fn SelectField(
    label: &'static str,
    options: Vec<String>,
    #[prop(into)] value: Signal<Option<String>>,
    on_change: Callback<String>,
) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let known = StoredValue::new(options);

    view! {
        <div class="field">
            <span class="field__label">{label}</span>
            <Show
                when=editing(detail)
                fallback=move || view! { <p class="field__value">{move || display_text(value.get().as_deref())}</p> }
            >
                <select class="field__input" on:change=move |ev| on_change.run(event_target_value(&ev))>
                    <option value="" selected=move || value.with(Option::is_none)>{NOT_SPECIFIED}</option>
                    {move || {
                        known
                            .with_value(|known| value.with(|current| select_options(known, current.as_deref())))
                            .into_iter()
                            .map(|option| {
                                let selected = option.clone();
                                let option_value = option.clone();
                                view! {
                                    <option
                                        value=option_value
                                        selected=move || value.with(|v| v.as_deref() == Some(selected.as_str()))
                                    >
                                        {option}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </Show>
        </div>
    }
}

#[component]
fn AirworthyField(index: usize) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let value = move || detail.with(|d| d.buffer.log_entries.get(index).is_none_or(|entry| entry.is_airworthy));

    view! {
        <div class="field field--checkbox">
            <Show
                when=editing(detail)
                fallback=move || {
                    view! {
                        <span class="field__label">"Is Airworthy"</span>
                        <p class="field__value">{move || display_bool(value())}</p>
                    }
                }
            >
                <label class="field__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=value
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            detail.update(|d| d.edit(LogEdit::Airworthy { index, value: checked }));
                        }
                    />
                    "Is Airworthy"
                </label>
            </Show>
        </div>
    }
}

/// Replaced part numbers: one input per part in edit mode.
#[component]
fn PartsField(index: usize) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let count = Memo::new(move |_| {
        detail.with(|d| d.buffer.log_entries.get(index).map_or(0, |entry| entry.part_number_replaced.len()))
    });
    let joined = move || {
        detail.with(|d| {
            d.buffer
                .log_entries
                .get(index)
                .map(|entry| entry.part_number_replaced.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="field">
            <span class="field__label">"Part Numbers Replaced"</span>
            <Show
                when=editing(detail)
                fallback=move || {
                    view! {
                        <Show
                            when=move || { count.get() > 0 }
                            fallback=|| view! { <p class="field__value field__value--empty">{NONE_SPECIFIED}</p> }
                        >
                            <ul class="field__list">
                                {move || joined().into_iter().map(|part| view! { <li>{part}</li> }).collect::<Vec<_>>()}
                            </ul>
                        </Show>
                    }
                }
            >
                <div class="field__parts">
                    {move || {
                        (0..count.get())
                            .map(|part| {
                                let value = move || {
                                    detail.with(|d| {
                                        d.buffer
                                            .log_entries
                                            .get(index)
                                            .and_then(|entry| entry.part_number_replaced.get(part).cloned())
                                            .unwrap_or_default()
                                    })
                                };
                                view! {
                                    <div class="field__part">
                                        <input
                                            class="field__input"
                                            type="text"
                                            prop:value=value
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                detail.update(|d| d.edit(LogEdit::SetPart { index, part, value }));
                                            }
                                        />
                                        <button
                                            class="btn btn--icon"
                                            type="button"
                                            title="Remove part"
                                            on:click=move |_| detail.update(|d| d.edit(LogEdit::RemovePart { index, part }))
                                        >
                                            "✕"
                                        </button>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                    <button
                        class="btn btn--link"
                        type="button"
                        on:click=move |_| detail.update(|d| d.edit(LogEdit::AddPart { index }))
                    >
                        "+ Add part numbers replaced"
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// All fields of one entry, in the two-column layout.
#[component]
pub fn EntryFields(index: usize) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();

    let risk = Signal::derive(move || {
        detail.with(|d| d.buffer.log_entries.get(index).and_then(|e| e.risk_level.as_ref()).map(|r| r.as_str().to_owned()))
    });
    let on_risk = Callback::new(move |raw: String| {
        let value = RiskLevel::from_label(&raw);
        detail.update(|d| d.edit(LogEdit::RiskLevel { index, value }));
    });
    let urgency = Signal::derive(move || {
        detail.with(|d| d.buffer.log_entries.get(index).and_then(|e| e.urgency.as_ref()).map(|u| u.as_str().to_owned()))
    });
    let on_urgency = Callback::new(move |raw: String| {
        let value = Urgency::from_label(&raw);
        detail.update(|d| d.edit(LogEdit::Urgency { index, value }));
    });

    view! {
        <div class="entry-fields">
            <div class="entry-fields__column">
                <section class="entry-fields__section">
                    <h5>"Work Information"</h5>
                    {entry_texts(detail, index, &EntryField::WORK)}
                    <PartsField index=index/>
                    {entry_texts(detail, index, &EntryField::REFERENCE)}
                </section>
                <section class="entry-fields__section">
                    <h5>"Compliance Information"</h5>
                    {entry_texts(detail, index, &EntryField::COMPLIANCE)}
                </section>
            </div>
            <div class="entry-fields__column">
                <section class="entry-fields__section">
                    <h5>"Technician Information"</h5>
                    {entry_texts(detail, index, &EntryField::TECHNICIAN)}
                </section>
                <section class="entry-fields__section">
                    <h5>"Risk Assessment"</h5>
                    <SelectField
                        label="Risk Level"
                        options=RiskLevel::ALL.iter().map(|r| r.as_str().to_owned()).collect()
                        value=risk
                        on_change=on_risk
                    />
                    <SelectField
                        label="Urgency"
                        options=Urgency::ALL.iter().map(|u| u.as_str().to_owned()).collect()
                        value=urgency
                        on_change=on_urgency
                    />
                    <AirworthyField index=index/>
                </section>
                <section class="entry-fields__section">
                    <h5>"Certification"</h5>
                    {entry_text(detail, index, EntryField::CertificationStatement)}
                </section>
            </div>
        </div>
    }
}

/// Collapsible "Entry #n" card used when a record has several entries.
#[component]
pub fn EntryCard(index: usize) -> impl IntoView {
    let detail = expect_context::<RwSignal<DetailState>>();
    let expanded = move || detail.with(|d| d.is_expanded(index));
    let description = move || {
        detail.with(|d| {
            d.buffer
                .log_entries
                .get(index)
                .and_then(|e| e.description_of_work_performed.clone())
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "No description".to_owned())
        })
    };
    let date = move || {
        detail.with(|d| {
            d.buffer
                .log_entries
                .get(index)
                .and_then(|e| e.date.clone())
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "No date".to_owned())
        })
    };

    view! {
        <div class="card entry-card">
            <div class="entry-card__header" on:click=move |_| detail.update(|d| d.toggle_entry(index))>
                <div class="entry-card__title">
                    <h4>{format!("Entry #{}", index + 1)}</h4>
                    <p class="entry-card__description">{description}</p>
                </div>
                <span class="entry-card__date">{date}</span>
                <span class="entry-card__chevron" aria-hidden="true">{move || if expanded() { "▾" } else { "▸" }}</span>
            </div>
            <Show when=expanded>
                <div class="entry-card__body">
                    <EntryFields index=index/>
                </div>
            </Show>
        </div>
    }
}
