//! Drop zone and file picker for one maintenance-log image.
//!
//! SYSTEM CONTEXT
//! ==============
//! Files are screened by `util::upload_filter` first; a rejection renders
//! inline and never reaches the store. Accepted files are read into memory
//! and handed to `LogStore::upload`, which owns the busy flags. On success
//! the view navigates to the new record's deep link.
//!
//! ERROR HANDLING
//! ==============
//! Validation and read failures stay local to this component. Backend
//! failures are toasted by the store; the inline retry hint is shown in
//! addition.

#[cfg(test)]
#[path = "upload_area_test.rs"]
mod upload_area_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::logs::LogsState;
use crate::util::upload_filter::{ACCEPT_ATTRIBUTE, FileMeta, format_size_mb};

pub const PROMPT_IDLE: &str = "Drag & drop a maintenance log image, or click to select";
pub const PROMPT_DRAGGING: &str = "Drop the maintenance log image here";
pub const PROMPT_PROCESSING: &str = "Processing...";

const INSTRUCTIONS: [&str; 4] = [
    "Ensure the maintenance log is clearly visible and well-lit",
    "Include all relevant sections: aircraft info, work performed, technician details",
    "Both handwritten and printed logs are supported",
    "Maximum file size: 10MB",
];

/// A file still being read counts as busy, before the store has raised its
/// own flag.
pub fn is_busy(store_uploading: bool, file_pending: bool) -> bool {
    store_uploading || file_pending
}

pub fn prompt_text(uploading: bool, dragging: bool) -> &'static str {
    if uploading {
        PROMPT_PROCESSING
    } else if dragging {
        PROMPT_DRAGGING
    } else {
        PROMPT_IDLE
    }
}

#[component]
pub fn UploadArea() -> impl IntoView {
    let logs = expect_context::<RwSignal<LogsState>>();
    let store = crate::state::log_store::use_log_store();
    let navigate = use_navigate();
    let dragging = RwSignal::new(false);
    let inline_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(None::<FileMeta>);
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let uploading = move || is_busy(logs.with(|s| s.uploading), pending.with(Option::is_some));

    #[cfg(feature = "hydrate")]
    let submit = {
        let store = store.clone();
        let navigate = navigate.clone();
        move |files: Vec<web_sys::File>| {
            browser::submit_files(files, store.clone(), navigate.clone(), inline_error, pending);
        }
    };
    #[cfg(not(feature = "hydrate"))]
    let _ = (&store, &navigate);

    let on_pick = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        if uploading() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        if !uploading() {
            dragging.set(true);
        }
    };

    let on_drag_leave = move |_ev: leptos::ev::DragEvent| dragging.set(false);

    let on_drop = {
        #[cfg(feature = "hydrate")]
        let submit = submit.clone();
        move |ev: leptos::ev::DragEvent| {
            ev.prevent_default();
            dragging.set(false);
            if uploading() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let files = ev.data_transfer().and_then(|dt| dt.files());
                submit(browser::file_list(files));
            }
        }
    };

    let on_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = input_ref.get() else {
                return;
            };
            let files = browser::file_list(input.files());
            // Allow picking the same file again after a failure.
            input.set_value("");
            submit(files);
        }
    };

    view! {
        <div class="upload">
            <div class="upload__grid">
                <div
                    class="upload__dropzone"
                    class:upload__dropzone--active=move || dragging.get()
                    class:upload__dropzone--disabled=uploading
                    on:click=on_pick
                    on:dragover=on_drag_over
                    on:dragleave=on_drag_leave
                    on:drop=on_drop
                >
                    <input
                        class="upload__input"
                        type="file"
                        accept=ACCEPT_ATTRIBUTE
                        node_ref=input_ref
                        on:change=on_change
                        on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                        disabled=uploading
                    />
                    <Show
                        when=uploading
                        fallback=|| view! { <span class="upload__icon" aria-hidden="true">"⇪"</span> }
                    >
                        <span class="spinner" aria-hidden="true"></span>
                    </Show>
                    <p class="upload__prompt">{move || prompt_text(uploading(), dragging.get())}</p>
                    <p class="upload__formats">"Supports JPEG, PNG, WebP, and TIFF formats"</p>
                    <Show when=move || !uploading()>
                        <button type="button" class="btn btn--primary" on:click=on_pick>
                            "Choose File"
                        </button>
                    </Show>
                </div>

                <div class="card upload__instructions">
                    <h3>"Upload Instructions"</h3>
                    <ul>
                        {INSTRUCTIONS.iter().map(|line| view! { <li>{*line}</li> }).collect::<Vec<_>>()}
                    </ul>
                </div>
            </div>

            <Show when=move || inline_error.with(Option::is_some)>
                <div class="upload__error" role="alert">
                    {move || inline_error.get().unwrap_or_default()}
                </div>
            </Show>

            {move || {
                pending
                    .get()
                    .map(|file| {
                        view! {
                            <div class="upload__preview">
                                <span class="upload__preview-name">{file.name}</span>
                                <span class="upload__preview-size">{format_size_mb(file.size)}</span>
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use leptos::prelude::*;
    use leptos_router::NavigateOptions;

    use crate::app::log_path;
    use crate::net::api::UploadFile;
    use crate::state::log_store::{BrowserStore, spawn_op};
    use crate::util::upload_filter::{FileMeta, UPLOAD_RETRY_MESSAGE, UploadRejection, validate_selection};

    pub fn file_list(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
        let Some(list) = list else {
            return Vec::new();
        };
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn file_meta(file: &web_sys::File) -> FileMeta {
        FileMeta { name: file.name(), mime_type: file.type_(), size: file.size() as u64 }
    }

    async fn read_file(file: &web_sys::File, meta: &FileMeta) -> Result<UploadFile, wasm_bindgen::JsValue> {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(UploadFile { name: meta.name.clone(), content_type: meta.mime_type.clone(), bytes })
    }

    pub fn submit_files<N>(
        files: Vec<web_sys::File>,
        store: BrowserStore,
        navigate: N,
        inline_error: RwSignal<Option<String>>,
        pending: RwSignal<Option<FileMeta>>,
    ) where
        N: Fn(&str, NavigateOptions) + 'static,
    {
        if pending.with_untracked(Option::is_some) {
            log::debug!("upload already in flight, ignoring selection");
            return;
        }
        let metas: Vec<FileMeta> = files.iter().map(file_meta).collect();
        let meta = match validate_selection(&metas) {
            Ok(meta) => meta.clone(),
            Err(rejection) => {
                log::info!("upload rejected: {rejection}");
                inline_error.set(Some(rejection.to_string()));
                return;
            }
        };
        let Some(file) = files.into_iter().next() else {
            return;
        };

        inline_error.set(None);
        pending.set(Some(meta.clone()));
        spawn_op(async move {
            let upload = match read_file(&file, &meta).await {
                Ok(upload) => upload,
                Err(err) => {
                    log::warn!("reading {} failed: {err:?}", meta.name);
                    let _ = inline_error.try_set(Some(UploadRejection::Unreadable.to_string()));
                    let _ = pending.try_set(None);
                    return;
                }
            };
            let result = store.upload(&upload).await;
            let _ = pending.try_set(None);
            match result {
                Ok(log) => navigate(&log_path(&log.id), NavigateOptions::default()),
                Err(_) => {
                    let _ = inline_error.try_set(Some(UPLOAD_RETRY_MESSAGE.to_owned()));
                }
            }
        });
    }
}
