//! Backend base URL resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host publishes the configured backend as
//! `<meta name="logbook-api-url" content="...">` in the SSR shell. After
//! hydration the client reads it back, so one WASM build can talk to
//! different backends. Precedence:
//!
//! 1. the meta tag (browser only)
//! 2. `LOGBOOK_API_URL` at compile time
//! 3. `DEFAULT_API_BASE_URL`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::net::api::DEFAULT_API_BASE_URL;

/// `name` of the meta tag carrying the backend URL.
pub const API_URL_META: &str = "logbook-api-url";

/// Backend location shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url) }
    }

    /// Resolve from the page on hydrate, or from build-time config otherwise.
    pub fn detect() -> Self {
        Self::new(&api_base_url())
    }
}

/// Trim whitespace and trailing slashes; blank input falls back to the default.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_API_BASE_URL.to_owned() } else { trimmed.to_owned() }
}

/// Choose the first non-blank candidate in precedence order.
pub fn resolve_base_url(from_page: Option<&str>, from_build: Option<&str>) -> String {
    let pick = [from_page, from_build]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    normalize_base_url(pick)
}

pub fn api_base_url() -> String {
    let from_page = meta_content(API_URL_META);
    resolve_base_url(from_page.as_deref(), option_env!("LOGBOOK_API_URL"))
}

fn meta_content(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let selector = format!("meta[name=\"{name}\"]");
        let element = document.query_selector(&selector).ok().flatten()?;
        let meta = element.dyn_into::<web_sys::HtmlMetaElement>().ok()?;
        Some(meta.content())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}
