//! Browser client for the aircraft maintenance log analyzer.
//!
//! ARCHITECTURE
//! ============
//! - `net`: wire types and the HTTP backend seam
//! - `state`: reducer, async store operations, detail-view state
//! - `components` / `pages`: Leptos views
//! - `util`: pure helpers plus the few browser-only shims
//!
//! Built twice: `hydrate` for the WASM bundle, `ssr` for the host.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
