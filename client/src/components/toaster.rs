//! Renders the toast queue in the top-right corner.
//!
//! Auto-dismissal is armed by `state::toasts::push_toast`; clicking a toast
//! dismisses it early.

use leptos::prelude::*;

use crate::state::toasts::{ToastKind, ToastState};

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            {move || {
                toasts
                    .get()
                    .toasts
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div
                                class="toast"
                                class:toast--success=toast.kind == ToastKind::Success
                                class:toast--error=toast.kind == ToastKind::Error
                                on:click=move |_| toasts.update(|state| state.dismiss(id))
                            >
                                {toast.message}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
